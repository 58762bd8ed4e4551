//! Company holiday calendar model.

use bizdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `holidays` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Holiday {
    pub id: DbId,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Body of `PUT /holidays`: the complete holiday list of one month.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveHolidays {
    pub month: Option<i32>,
    pub year: Option<i32>,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}
