//! Daily attendance and monthly attendance summary models.

use bizdesk_core::attendance::duration_hours;
use bizdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `attendance` table.
///
/// `duration` is stored as a label such as `"8h 30m"`; API output uses
/// [`AttendanceResponse`] which converts it to decimal hours.
#[derive(Debug, Clone, FromRow)]
pub struct Attendance {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub date: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<String>,
    pub duration: Option<String>,
    pub device_in: Option<serde_json::Value>,
    pub device_out: Option<serde_json::Value>,
    pub location_in: Option<serde_json::Value>,
    pub location_out: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// Attendance record as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub date: NaiveDate,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub status: Option<String>,
    /// Worked time in hours, `0` when unknown.
    pub duration: f64,
    pub device_in: Option<serde_json::Value>,
    pub device_out: Option<serde_json::Value>,
    pub location_in: Option<serde_json::Value>,
    pub location_out: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

impl From<Attendance> for AttendanceResponse {
    fn from(row: Attendance) -> Self {
        Self {
            duration: duration_hours(row.duration.as_deref()),
            id: row.id,
            email: row.email,
            username: row.username,
            date: row.date,
            check_in: row.check_in,
            check_out: row.check_out,
            status: row.status,
            device_in: row.device_in,
            device_out: row.device_out,
            location_in: row.location_in,
            location_out: row.location_out,
            created_at: row.created_at,
        }
    }
}

/// A row from the `attendance_summaries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceSummary {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub month: i32,
    pub year: i32,
    pub present: f64,
    pub absent: f64,
    pub total_days: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /attendance/check-in`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckIn {
    pub email: Option<String>,
    pub username: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(alias = "checkIn")]
    pub check_in: Option<String>,
    pub device: Option<serde_json::Value>,
    pub location: Option<serde_json::Value>,
}

/// Body of `PUT /attendance/check-out`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckOut {
    pub email: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(alias = "checkOut")]
    pub check_out: Option<String>,
    #[serde(alias = "deviceOut")]
    pub device_out: Option<serde_json::Value>,
    #[serde(alias = "locationOut")]
    pub location_out: Option<serde_json::Value>,
}

/// Insert DTO for a validated check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub date: NaiveDate,
    pub check_in: Option<&'a str>,
    pub status: &'a str,
    pub device: Option<&'a serde_json::Value>,
    pub location: Option<&'a serde_json::Value>,
}

/// Update DTO applied on check-out.
#[derive(Debug, Clone)]
pub struct CheckOutUpdate<'a> {
    pub check_out: Option<&'a str>,
    pub status: &'a str,
    pub duration: &'a str,
    pub device_out: Option<&'a serde_json::Value>,
    pub location_out: Option<&'a serde_json::Value>,
}

/// One entry of `POST /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub present: Option<f64>,
    pub absent: Option<f64>,
    #[serde(alias = "totalDays")]
    pub total_days: Option<i32>,
}
