use crate::types::DbId;

/// Domain failures shared by the payroll, quotation, stock and access rules.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A row addressed by id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input rejected by a business rule (bad month, locked quotation, ...).
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A uniqueness rule was violated, e.g. a duplicate check-in.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
