//! Quotation lifecycle rules: status sets, the completed lock, and quote
//! numbering (fresh numbers and the `-R{n}` re-quote chain).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Quotation status
// ---------------------------------------------------------------------------

/// Lifecycle status of a quotation, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Paid,
    Cancelled,
    Completed,
    Requote,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 8] = [
        QuotationStatus::Draft,
        QuotationStatus::Sent,
        QuotationStatus::Accepted,
        QuotationStatus::Rejected,
        QuotationStatus::Paid,
        QuotationStatus::Cancelled,
        QuotationStatus::Completed,
        QuotationStatus::Requote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Paid => "paid",
            QuotationStatus::Cancelled => "cancelled",
            QuotationStatus::Completed => "completed",
            QuotationStatus::Requote => "requote",
        }
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuotationStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid status '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Item status
// ---------------------------------------------------------------------------

/// Fulfilment status of a single quotation line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Approved,
    Rejected,
    Dispatched,
    Delivered,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 5] = [
        ItemStatus::Pending,
        ItemStatus::Approved,
        ItemStatus::Rejected,
        ItemStatus::Dispatched,
        ItemStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Approved => "approved",
            ItemStatus::Rejected => "rejected",
            ItemStatus::Dispatched => "dispatched",
            ItemStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Invalid item status '{s}'")))
    }
}

/// Review status shared by quotations and their items.
pub const REVIEW_PENDING: &str = "pending";

// ---------------------------------------------------------------------------
// Completed lock
// ---------------------------------------------------------------------------

/// Whether a stored status string marks the quotation as completed.
///
/// Stored values are compared case-insensitively so rows written by
/// older clients (`"Completed"`) are locked too.
pub fn is_completed(status: &str) -> bool {
    status.eq_ignore_ascii_case(QuotationStatus::Completed.as_str())
}

/// Reject any mutation of a completed quotation or its items.
pub fn ensure_mutable(status: &str, action: &str) -> Result<(), CoreError> {
    if is_completed(status) {
        return Err(CoreError::Conflict(format!(
            "Cannot {action} a completed quotation"
        )));
    }
    Ok(())
}

/// Validate a requested status change against the current stored status.
///
/// Any status may be entered from any non-completed status; a completed
/// quotation can only be re-marked completed.
pub fn validate_status_change(current: &str, requested: &str) -> Result<QuotationStatus, CoreError> {
    let next: QuotationStatus = requested.parse()?;
    if is_completed(current) && next != QuotationStatus::Completed {
        return Err(CoreError::Conflict(
            "Cannot change status of a completed quotation".into(),
        ));
    }
    Ok(next)
}

// ---------------------------------------------------------------------------
// Quote numbering
// ---------------------------------------------------------------------------

/// Upper bound (exclusive) of the random serial in a fresh quote number.
const SERIAL_LIMIT: u32 = 1_000_000;

static REQUOTE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)-R(\d+)$").expect("valid requote regex"));

/// Format a fresh quote number: `Q-YYYYMMDD-NNNNNN`.
pub fn format_quote_number(date: NaiveDate, serial: u32) -> String {
    format!("Q-{}-{:06}", date.format("%Y%m%d"), serial % SERIAL_LIMIT)
}

/// Generate a fresh quote number for `date` with a random 6-digit serial.
///
/// Uniqueness is enforced by the database constraint only; a collision
/// surfaces as a conflict to the caller.
pub fn generate_quote_number(date: NaiveDate) -> String {
    let serial = rand::rng().random_range(0..SERIAL_LIMIT);
    format_quote_number(date, serial)
}

/// Split a quote number into its base and re-quote revision (0 when absent).
pub fn split_requote_suffix(quote_number: &str) -> (&str, u32) {
    REQUOTE_SUFFIX
        .captures(quote_number)
        .and_then(|caps| {
            let base = caps.get(1)?.as_str();
            let revision = caps.get(2)?.as_str().parse::<u32>().ok()?;
            Some((base, revision))
        })
        .unwrap_or((quote_number, 0))
}

/// Derive the next re-quote number: `X` becomes `X-R1`, `X-Rn` becomes `X-R{n+1}`.
pub fn next_requote_number(quote_number: &str) -> String {
    let (base, revision) = split_requote_suffix(quote_number);
    format!("{base}-R{}", revision.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn first_requote_appends_r1() {
        assert_eq!(next_requote_number("Q-20240101-000001"), "Q-20240101-000001-R1");
    }

    #[test]
    fn requote_of_requote_increments() {
        let first = next_requote_number("Q-20240101-000001");
        assert_eq!(next_requote_number(&first), "Q-20240101-000001-R2");
    }

    #[test]
    fn multi_digit_revision_increments() {
        assert_eq!(next_requote_number("Q-20240101-123456-R9"), "Q-20240101-123456-R10");
        assert_eq!(next_requote_number("Q-20240101-123456-R10"), "Q-20240101-123456-R11");
    }

    #[test]
    fn bare_r_without_digits_is_not_a_suffix() {
        assert_eq!(next_requote_number("Q-1-R"), "Q-1-R-R1");
    }

    #[test]
    fn oversized_revision_is_treated_as_plain_text() {
        let number = "Q-1-R99999999999999999999";
        assert_eq!(split_requote_suffix(number), (number, 0));
    }

    #[test]
    fn fresh_number_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_quote_number(date, 42), "Q-20240101-000042");
        let generated = generate_quote_number(date);
        assert!(generated.starts_with("Q-20240101-"));
        assert_eq!(generated.len(), "Q-20240101-000000".len());
    }

    #[test]
    fn status_parsing() {
        assert_eq!("draft".parse::<QuotationStatus>().unwrap(), QuotationStatus::Draft);
        assert_matches!(
            "archived".parse::<QuotationStatus>(),
            Err(CoreError::Validation(_))
        );
        assert_matches!("shipped".parse::<ItemStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn completed_is_locked_case_insensitively() {
        assert_matches!(ensure_mutable("Completed", "update"), Err(CoreError::Conflict(_)));
        assert!(ensure_mutable("sent", "update").is_ok());
    }

    #[test]
    fn completed_can_only_stay_completed() {
        assert_matches!(
            validate_status_change("completed", "draft"),
            Err(CoreError::Conflict(_))
        );
        assert_eq!(
            validate_status_change("completed", "completed").unwrap(),
            QuotationStatus::Completed
        );
        assert_eq!(
            validate_status_change("draft", "requote").unwrap(),
            QuotationStatus::Requote
        );
    }
}
