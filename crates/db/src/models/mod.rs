//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod access;
pub mod advance;
pub mod attendance;
pub mod company;
pub mod de;
pub mod employee;
pub mod holiday;
pub mod lookup;
pub mod quotation;
pub mod salary;
pub mod stock;
pub mod task;
pub mod user;
pub mod visit_report;
