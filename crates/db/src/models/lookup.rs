//! Name-only organisation lookups: departments, designations and
//! industrial segments.
//!
//! The three tables share one row shape, so a single [`LookupEntry`] and a
//! marker trait per table cover them all.

use bizdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from any lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LookupEntry {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Create/rename payload. The name is trimmed before use.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupInput {
    #[serde(default)]
    pub name: String,
}

/// A table holding [`LookupEntry`] rows.
pub trait LookupTable: Send + Sync + 'static {
    /// Physical table name.
    const TABLE: &'static str;
    /// Entity label used in error messages.
    const ENTITY: &'static str;
}

pub struct Department;

impl LookupTable for Department {
    const TABLE: &'static str = "departments";
    const ENTITY: &'static str = "Department";
}

pub struct Designation;

impl LookupTable for Designation {
    const TABLE: &'static str = "designations";
    const ENTITY: &'static str = "Designation";
}

pub struct IndustrialSegment;

impl LookupTable for IndustrialSegment {
    const TABLE: &'static str = "industrial_segments";
    const ENTITY: &'static str = "IndustrialSegment";
}
