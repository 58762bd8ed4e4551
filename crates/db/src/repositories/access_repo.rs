//! Repository for `user_types`, `modules`, `user_permissions` and
//! `access_controls`.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::access::{
    AccessControlView, Module, ModulePermission, PermissionUpdate, PermissionView, UserType,
};

/// Column list shared by `user_types` and `modules` queries.
const COLUMNS: &str = "id, name, created_at";

/// Column list for joined permission queries.
const PERMISSION_COLUMNS: &str = "\
    p.id, p.user_type_id, ut.name AS user_type_name, p.module_id, \
    m.name AS module_name, p.can_view, p.created_at";

/// Provides data access for role-to-module visibility.
pub struct AccessRepo;

impl AccessRepo {
    // -----------------------------------------------------------------------
    // User types
    // -----------------------------------------------------------------------

    /// List all user types, newest first.
    pub async fn list_user_types(pool: &PgPool) -> Result<Vec<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types ORDER BY id DESC");
        sqlx::query_as::<_, UserType>(&query).fetch_all(pool).await
    }

    pub async fn find_user_type(pool: &PgPool, id: DbId) -> Result<Option<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types WHERE id = $1");
        sqlx::query_as::<_, UserType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user type by name, ignoring case.
    pub async fn find_user_type_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types WHERE lower(name) = lower($1) LIMIT 1");
        sqlx::query_as::<_, UserType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn create_user_type(pool: &PgPool, name: &str) -> Result<UserType, sqlx::Error> {
        let query = format!("INSERT INTO user_types (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserType>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn rename_user_type(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<UserType>, sqlx::Error> {
        let query = format!("UPDATE user_types SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserType>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user type together with its access-control and permission rows.
    ///
    /// Returns `true` if the user type existed.
    pub async fn delete_user_type(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM access_controls WHERE user_type_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM user_permissions WHERE user_type_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM user_types WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Modules
    // -----------------------------------------------------------------------

    pub async fn list_modules(pool: &PgPool) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules ORDER BY id");
        sqlx::query_as::<_, Module>(&query).fetch_all(pool).await
    }

    pub async fn create_module(pool: &PgPool, name: &str) -> Result<Module, sqlx::Error> {
        let query = format!("INSERT INTO modules (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Module>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn rename_module(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("UPDATE modules SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a module; its permission rows cascade.
    pub async fn delete_module(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Permissions
    // -----------------------------------------------------------------------

    pub async fn list_permissions(pool: &PgPool) -> Result<Vec<PermissionView>, sqlx::Error> {
        let query = format!(
            "SELECT {PERMISSION_COLUMNS} FROM user_permissions p
             JOIN user_types ut ON ut.id = p.user_type_id
             JOIN modules m ON m.id = p.module_id
             ORDER BY p.user_type_id, m.name"
        );
        sqlx::query_as::<_, PermissionView>(&query)
            .fetch_all(pool)
            .await
    }

    /// Every permission entry for one user type.
    pub async fn permissions_for_user_type(
        pool: &PgPool,
        user_type_id: DbId,
    ) -> Result<Vec<ModulePermission>, sqlx::Error> {
        sqlx::query_as::<_, ModulePermission>(
            "SELECT m.name AS module_name, p.can_view FROM user_permissions p
             JOIN modules m ON m.id = p.module_id
             WHERE p.user_type_id = $1
             ORDER BY m.name",
        )
        .bind(user_type_id)
        .fetch_all(pool)
        .await
    }

    /// Names of the modules a user type may view.
    pub async fn granted_module_names(
        pool: &PgPool,
        user_type_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT m.name FROM user_permissions p
             JOIN modules m ON m.id = p.module_id
             WHERE p.user_type_id = $1 AND p.can_view
             ORDER BY m.name",
        )
        .bind(user_type_id)
        .fetch_all(pool)
        .await
    }

    pub async fn all_module_names(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT name FROM modules ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Apply a batch of permission updates in one transaction.
    ///
    /// Entries without a user type or module name are skipped. Modules are
    /// matched case-insensitively and created on demand. Returns the number
    /// of applied entries.
    pub async fn upsert_permissions(
        pool: &PgPool,
        updates: &[PermissionUpdate],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut applied = 0;

        for update in updates {
            let (Some(user_type_id), Some(module_name)) = (
                update.user_type_id,
                update.module_name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
            ) else {
                continue;
            };

            let existing = sqlx::query_scalar::<_, DbId>(
                "SELECT id FROM modules WHERE lower(name) = lower($1) LIMIT 1",
            )
            .bind(module_name)
            .fetch_optional(&mut *tx)
            .await?;
            let module_id = match existing {
                Some(id) => id,
                None => {
                    sqlx::query_scalar::<_, DbId>(
                        "INSERT INTO modules (name) VALUES ($1) RETURNING id",
                    )
                    .bind(module_name)
                    .fetch_one(&mut *tx)
                    .await?
                }
            };

            sqlx::query(
                "INSERT INTO user_permissions (user_type_id, module_id, can_view)
                 VALUES ($1, $2, $3)
                 ON CONFLICT ON CONSTRAINT uq_user_permissions_user_type_module
                 DO UPDATE SET can_view = EXCLUDED.can_view",
            )
            .bind(user_type_id)
            .bind(module_id)
            .bind(update.granted())
            .execute(&mut *tx)
            .await?;
            applied += 1;
        }

        tx.commit().await?;
        Ok(applied)
    }

    // -----------------------------------------------------------------------
    // Access control
    // -----------------------------------------------------------------------

    pub async fn list_access_controls(
        pool: &PgPool,
    ) -> Result<Vec<AccessControlView>, sqlx::Error> {
        sqlx::query_as::<_, AccessControlView>(
            "SELECT ac.id, ac.user_type_id, ut.name AS user_type_name, ac.allow_access, ac.created_at
             FROM access_controls ac
             LEFT JOIN user_types ut ON ut.id = ac.user_type_id
             ORDER BY ac.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Replace the access-control rows of the given user types.
    pub async fn replace_access_controls(
        pool: &PgPool,
        user_type_ids: &[DbId],
        allow_access: bool,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM access_controls WHERE user_type_id = ANY($1)")
            .bind(user_type_ids)
            .execute(&mut *tx)
            .await?;

        for user_type_id in user_type_ids {
            sqlx::query("INSERT INTO access_controls (user_type_id, allow_access) VALUES ($1, $2)")
                .bind(user_type_id)
                .bind(allow_access)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
