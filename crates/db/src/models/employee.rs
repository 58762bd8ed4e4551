//! Employee model and DTOs.
//!
//! Employees are created from multipart forms; the API layer parses the
//! text fields into these DTOs and stores document files separately.

use bizdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub email: String,
    pub address: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub doj: Option<NaiveDate>,
    pub emp_type: Option<String>,
    pub user_type: Option<String>,
    pub mobile: String,
    pub alt_contact: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub photo: Option<String>,
    pub pan_attachment: Option<String>,
    pub aadhar_attachment: Option<String>,
    pub esi_pf_status: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    /// Stored document paths, relative to the upload root.
    pub fn document_paths(&self) -> impl Iterator<Item = &str> {
        [&self.photo, &self.pan_attachment, &self.aadhar_attachment]
            .into_iter()
            .filter_map(|path| path.as_deref())
    }
}

/// Insert DTO built from a validated multipart form.
#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub email: String,
    pub address: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub doj: Option<NaiveDate>,
    pub emp_type: Option<String>,
    pub user_type: Option<String>,
    pub mobile: String,
    pub alt_contact: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
    pub password_hash: String,
    pub photo: Option<String>,
    pub pan_attachment: Option<String>,
    pub aadhar_attachment: Option<String>,
    pub esi_pf_status: Option<String>,
    pub created_by: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub doj: Option<NaiveDate>,
    pub emp_type: Option<String>,
    pub user_type: Option<String>,
    pub mobile: Option<String>,
    pub alt_contact: Option<String>,
    pub pan: Option<String>,
    pub aadhar: Option<String>,
    pub password_hash: Option<String>,
    pub photo: Option<String>,
    pub pan_attachment: Option<String>,
    pub aadhar_attachment: Option<String>,
    pub esi_pf_status: Option<String>,
}
