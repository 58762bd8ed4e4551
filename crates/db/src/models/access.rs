//! User types, modules, permissions and access-control models.
//!
//! Permissions map a user type to the modules it may see. They gate the
//! UI only; nothing here is enforced on requests.

use bizdesk_core::permissions::access_flag;
use bizdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `user_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserType {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A row from the `modules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A `user_permissions` row joined with its user type and module names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PermissionView {
    pub id: DbId,
    pub user_type_id: DbId,
    pub user_type_name: String,
    pub module_id: DbId,
    pub module_name: String,
    pub can_view: bool,
    pub created_at: Timestamp,
}

/// One module entry of a user type's permission list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModulePermission {
    pub module_name: String,
    pub can_view: bool,
}

/// An `access_controls` row joined with its user type name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccessControlView {
    pub id: DbId,
    pub user_type_id: DbId,
    pub user_type_name: Option<String>,
    pub allow_access: bool,
    pub created_at: Timestamp,
}

/// Modules visible to a named user type.
#[derive(Debug, Clone, Serialize)]
pub struct UserTypeModules {
    pub user_type_name: String,
    pub modules: Vec<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Create/rename payload shared by user types and modules.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NameInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// One entry of `POST /permissions/upsert`.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionUpdate {
    #[serde(default, alias = "usertype_id")]
    pub user_type_id: Option<DbId>,
    #[serde(default)]
    pub module_name: Option<String>,
    #[serde(default)]
    pub can_view: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub has_access: Option<bool>,
}

impl PermissionUpdate {
    /// The effective visibility: `can_view` wins over the legacy flag.
    pub fn granted(&self) -> bool {
        self.can_view.or(self.has_access).unwrap_or(false)
    }
}

/// Body of `POST /permissions/upsert`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPermissions {
    #[serde(default)]
    pub updates: Vec<PermissionUpdate>,
}

/// Body of `POST /access-control`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetAccessControl {
    #[serde(default)]
    pub user_type_ids: Vec<DbId>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub allow_access: bool,
}

/// Accepts `true`/`false` or the legacy integers `1`/`0`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl From<Flag> for bool {
    fn from(flag: Flag) -> Self {
        match flag {
            Flag::Bool(value) => value,
            Flag::Int(value) => access_flag(value),
        }
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Flag::deserialize(deserializer).map(bool::from)
}

fn deserialize_optional_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Ok(Option::<Flag>::deserialize(deserializer)?.map(bool::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_flag_accepts_bool_and_integer() {
        let from_int: SetAccessControl =
            serde_json::from_str(r#"{"user_type_ids": [1], "allow_access": 1}"#).unwrap();
        assert!(from_int.allow_access);

        let from_bool: SetAccessControl =
            serde_json::from_str(r#"{"user_type_ids": [1], "allow_access": false}"#).unwrap();
        assert!(!from_bool.allow_access);

        let missing: SetAccessControl = serde_json::from_str(r#"{"user_type_ids": []}"#).unwrap();
        assert!(!missing.allow_access);
    }

    #[test]
    fn permission_update_prefers_can_view() {
        let update: PermissionUpdate = serde_json::from_str(
            r#"{"usertype_id": 3, "module_name": "Stock", "can_view": false, "has_access": 1}"#,
        )
        .unwrap();
        assert_eq!(update.user_type_id, Some(3));
        assert!(!update.granted());

        let legacy: PermissionUpdate =
            serde_json::from_str(r#"{"user_type_id": 3, "module_name": "Stock", "has_access": 1}"#)
                .unwrap();
        assert!(legacy.granted());
    }
}
