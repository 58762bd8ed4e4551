//! Sales visit report model and DTOs.

use bizdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Creator recorded when a form omits `created_by`.
pub const DEFAULT_CREATOR: &str = "Admin";

/// A row from the `visit_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VisitReport {
    pub id: DbId,
    pub company_name: String,
    pub company_address: Option<String>,
    pub pin_code: Option<String>,
    pub industry_segment: Option<String>,
    pub customer_name: Option<String>,
    pub customer_mobile: String,
    pub customer_email: Option<String>,
    pub department: Option<String>,
    pub notes: Option<String>,
    /// Path of the stored attachment, relative to the upload root.
    pub attachment: Option<String>,
    pub created_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO built from a multipart form.
#[derive(Debug, Clone)]
pub struct CreateVisitReport {
    pub company_name: String,
    pub company_address: Option<String>,
    pub pin_code: Option<String>,
    pub industry_segment: Option<String>,
    pub customer_name: Option<String>,
    pub customer_mobile: String,
    pub customer_email: Option<String>,
    pub department: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
    pub created_by: String,
}

/// Partial update built from a multipart form.
#[derive(Debug, Clone, Default)]
pub struct UpdateVisitReport {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub pin_code: Option<String>,
    pub industry_segment: Option<String>,
    pub customer_name: Option<String>,
    pub customer_mobile: Option<String>,
    pub customer_email: Option<String>,
    pub department: Option<String>,
    pub notes: Option<String>,
    pub attachment: Option<String>,
    pub created_by: Option<String>,
}
