//! Salary advance model and DTOs.

use bizdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Status given to advances created without one.
pub const DEFAULT_ADVANCE_STATUS: &str = "Pending";

/// A row from the `advances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Advance {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub department: Option<String>,
    pub amount: f64,
    pub reason: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub deduct_month: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an advance.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdvance {
    pub email: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub deduct_month: Option<String>,
    pub status: Option<String>,
}

/// DTO for partially updating an advance.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAdvance {
    pub email: Option<String>,
    pub name: Option<String>,
    pub department: Option<String>,
    pub amount: Option<f64>,
    pub reason: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub deduct_month: Option<String>,
    pub status: Option<String>,
}
