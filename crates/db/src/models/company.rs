//! Customer company model and DTO.

use bizdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    pub company_name: String,
    pub company_address: String,
    pub pin_code: String,
    pub industry_segment: String,
    pub customer_name: String,
    pub customer_mobile: String,
    pub customer_email: String,
    pub department: String,
    pub personal_mobile: String,
    pub personal_email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create and full-update payload; every field is required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, message = "company_name is required"))]
    #[serde(default)]
    pub company_name: String,
    #[validate(length(min = 1, message = "company_address is required"))]
    #[serde(default)]
    pub company_address: String,
    #[validate(length(min = 1, message = "pin_code is required"))]
    #[serde(default)]
    pub pin_code: String,
    #[validate(length(min = 1, message = "industry_segment is required"))]
    #[serde(default)]
    pub industry_segment: String,
    #[validate(length(min = 1, message = "customer_name is required"))]
    #[serde(default)]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customer_mobile is required"))]
    #[serde(default)]
    pub customer_mobile: String,
    #[validate(length(min = 1, message = "customer_email is required"))]
    #[serde(default)]
    pub customer_email: String,
    #[validate(length(min = 1, message = "department is required"))]
    #[serde(default)]
    pub department: String,
    #[validate(length(min = 1, message = "personal_mobile is required"))]
    #[serde(default)]
    pub personal_mobile: String,
    #[validate(length(min = 1, message = "personal_email is required"))]
    #[serde(default)]
    pub personal_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fail_validation() {
        let input: CompanyInput =
            serde_json::from_str(r#"{"company_name": "Acme", "pin_code": "560001"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("customer_mobile"));
        assert!(!fields.contains_key("company_name"));
    }
}
