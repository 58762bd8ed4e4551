//! Work task model and DTOs.
//!
//! A task is assigned to a person and may be linked to a quotation line
//! item, in which case it carries a copy of the item's dimensions.

use bizdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::de::optional_text;

/// Status given to tasks created without one.
pub const DEFAULT_TASK_STATUS: &str = "Pending";

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub assigned_to: Option<String>,
    pub assigned_by: Option<String>,
    pub assigned_by_email: Option<String>,
    pub quotation_id: Option<DbId>,
    pub quotation_number: Option<String>,
    pub company_name: Option<String>,
    pub item_id: Option<DbId>,
    pub item_name: Option<String>,
    pub supplier_part_no: Option<String>,
    pub hsn_sac: Option<String>,
    pub cut_width: Option<String>,
    pub length: Option<String>,
    pub quantity: Option<String>,
    pub unit: String,
    pub mrp: Option<String>,
    pub material_type: Option<String>,
    pub thickness: Option<String>,
    pub status: String,
    pub status_check: Option<String>,
    pub note: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<Timestamp>,
    pub invoice_amount: Option<f64>,
    pub invoice_remarks: Option<String>,
    pub invoice_created_at: Option<Timestamp>,
    pub production_start_date: Option<Timestamp>,
    pub production_end_date: Option<Timestamp>,
    pub production_status: Option<String>,
    pub quality_check: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create and partial-update payload. Absent fields keep their value on
/// update and take the column default on create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    #[serde(alias = "dueDate")]
    pub due_date: Option<String>,
    #[serde(alias = "assignedTo")]
    pub assigned_to: Option<String>,
    #[serde(alias = "assignedBy")]
    pub assigned_by: Option<String>,
    #[serde(alias = "assignedByEmail")]
    pub assigned_by_email: Option<String>,
    pub quotation_id: Option<DbId>,
    pub quotation_number: Option<String>,
    pub company_name: Option<String>,
    pub item_id: Option<DbId>,
    pub item_name: Option<String>,
    pub supplier_part_no: Option<String>,
    pub hsn_sac: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub cut_width: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub length: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub quantity: Option<String>,
    pub unit: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub mrp: Option<String>,
    pub material_type: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub thickness: Option<String>,
    pub status: Option<String>,
    pub status_check: Option<String>,
    pub note: Option<String>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<Timestamp>,
    pub invoice_amount: Option<f64>,
    pub invoice_remarks: Option<String>,
    pub invoice_created_at: Option<Timestamp>,
    pub production_start_date: Option<Timestamp>,
    pub production_end_date: Option<Timestamp>,
    pub production_status: Option<String>,
    pub quality_check: Option<String>,
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub assigned_to: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_input_accepts_camel_case_and_numeric_dimensions() {
        let input: TaskInput = serde_json::from_str(
            r#"{"title": "Cut belt", "assignedTo": "meena", "dueDate": "2025-02-01",
                "quantity": 4, "length": "1200"}"#,
        )
        .unwrap();
        assert_eq!(input.assigned_to.as_deref(), Some("meena"));
        assert_eq!(input.due_date.as_deref(), Some("2025-02-01"));
        assert_eq!(input.quantity.as_deref(), Some("4"));
        assert_eq!(input.length.as_deref(), Some("1200"));
        assert!(input.status.is_none());
    }
}
