//! Quotation and quotation line-item models, request DTOs and statistics.
//!
//! Money and dimension columns are `NUMERIC` and map to [`Decimal`]; they
//! serialize as JSON numbers.

use std::collections::BTreeMap;

use bizdesk_core::types::{DbId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `quotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quotation {
    pub id: DbId,
    pub quote_number: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub company_id: Option<DbId>,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_gstin: Option<String>,
    pub contact_person: Option<String>,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub issuer_details: serde_json::Value,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    pub status: String,
    pub review_status: String,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub notes: Option<String>,
    pub requote_note: Option<String>,
    pub original_quote_id: Option<DbId>,
    pub requote_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `quotation_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationItem {
    pub id: DbId,
    pub quotation_id: DbId,
    pub item_name: String,
    pub hsn_sac: Option<String>,
    pub supplier_part_no: Option<String>,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub cut_width: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub length: Decimal,
    pub batch_no: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub mrp: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    pub discount_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    pub item_status: String,
    pub review_status: String,
    pub updated_by: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_unit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_before_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_after_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub item_total: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A quotation together with its line items.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationWithItems {
    #[serde(flatten)]
    pub quotation: Quotation,
    pub items: Vec<QuotationItem>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// A line item in a create or update payload.
///
/// On update, an item with an `id` belonging to the quotation is patched;
/// an item without one is added.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuotationItemInput {
    pub id: Option<DbId>,
    pub item_name: Option<String>,
    pub hsn_sac: Option<String>,
    pub supplier_part_no: Option<String>,
    pub description: Option<String>,
    pub cut_width: Option<Decimal>,
    pub length: Option<Decimal>,
    pub batch_no: Option<String>,
    pub mrp: Option<Decimal>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub discount: Option<Decimal>,
    pub discount_type: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub item_status: Option<String>,
    pub review_status: Option<String>,
    pub updated_by: Option<String>,
    pub price_per_unit: Option<Decimal>,
    pub amount_before_discount: Option<Decimal>,
    pub discount_amount: Option<Decimal>,
    pub amount_after_discount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub item_total: Option<Decimal>,
}

/// Body of `POST /quotations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateQuotation {
    pub quote_number: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub company_id: Option<DbId>,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_gstin: Option<String>,
    pub contact_person: Option<String>,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub issuer_details: Option<serde_json::Value>,
    pub subtotal: Option<Decimal>,
    pub total_discount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub grand_total: Option<Decimal>,
    pub notes: Option<String>,
    pub requote_note: Option<String>,
    pub original_quote_id: Option<DbId>,
    pub status: Option<String>,
    pub review_status: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub items: Vec<QuotationItemInput>,
}

/// Body of `PUT /quotations/{id}`. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateQuotation {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_gstin: Option<String>,
    pub contact_person: Option<String>,
    pub contact_mobile: Option<String>,
    pub contact_email: Option<String>,
    pub subtotal: Option<Decimal>,
    pub total_discount: Option<Decimal>,
    pub total_tax: Option<Decimal>,
    pub grand_total: Option<Decimal>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub review_status: Option<String>,
    pub updated_by: Option<String>,
    pub requote_note: Option<String>,
    /// Applied only together with `status = "requote"`.
    pub quote_number: Option<String>,
    pub original_quote_id: Option<DbId>,
    pub requote_date: Option<Timestamp>,
    pub items: Option<Vec<QuotationItemInput>>,
}

/// Body of `PATCH /quotations/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotationStatusChange {
    #[serde(default)]
    pub status: String,
    pub requote_note: Option<String>,
    pub updated_by: Option<String>,
}

/// Body of `PATCH /quotations/{id}/items/{item_id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemStatusChange {
    #[serde(default)]
    pub status: String,
    pub updated_by: Option<String>,
}

/// Body of `PATCH /quotations/{id}/items/bulk-status`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkItemStatusChange {
    #[serde(default)]
    pub item_ids: Vec<DbId>,
    #[serde(default)]
    pub status: String,
    pub updated_by: Option<String>,
}

/// Body of `POST /quotations/{id}/requote`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequoteRequest {
    pub notes: Option<String>,
    pub requote_note: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub update_original_status: bool,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// A `(status, count)` pair from a `GROUP BY` query.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Revenue summed over one calendar month.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyTotal {
    pub month: i32,
    pub total: Decimal,
}

/// Per-status counts keyed by every known status, zero-filled.
pub fn status_count_map(known: &[&str], counts: &[StatusCount]) -> BTreeMap<String, i64> {
    let mut map: BTreeMap<String, i64> = known.iter().map(|s| (s.to_string(), 0)).collect();
    for entry in counts {
        if let Some(count) = map.get_mut(entry.status.as_str()) {
            *count += entry.count;
        }
    }
    map
}

/// Response of `GET /quotations/{id}/item-statistics`.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationItemStatistics {
    pub quotation_id: DbId,
    pub quote_number: String,
    pub total_items: i64,
    pub status_counts: BTreeMap<String, i64>,
}

/// Item-level part of [`QuotationStatistics`].
#[derive(Debug, Clone, Serialize)]
pub struct ItemStatistics {
    pub total_items: i64,
    pub avg_items_per_quotation: f64,
    pub status_counts: BTreeMap<String, i64>,
}

/// Response of `GET /quotations/statistics`.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationStatistics {
    pub total: i64,
    pub status_counts: BTreeMap<String, i64>,
    /// Grand-total sums for the current year keyed by month number.
    pub monthly_totals: BTreeMap<i32, f64>,
    pub current_month_revenue: f64,
    pub year: i32,
    pub item_statistics: ItemStatistics,
}

/// Average rounded to two decimals; zero when there is nothing to divide by.
pub fn average_items(total_items: i64, total_quotations: i64) -> f64 {
    if total_quotations <= 0 {
        return 0.0;
    }
    (total_items as f64 / total_quotations as f64 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_count_map_zero_fills_known_statuses() {
        let counts = vec![
            StatusCount { status: "draft".into(), count: 3 },
            StatusCount { status: "legacy".into(), count: 9 },
        ];
        let map = status_count_map(&["draft", "sent"], &counts);
        assert_eq!(map.get("draft"), Some(&3));
        assert_eq!(map.get("sent"), Some(&0));
        assert!(!map.contains_key("legacy"));
    }

    #[test]
    fn average_items_rounds_to_two_places() {
        assert_eq!(average_items(10, 3), 3.33);
        assert_eq!(average_items(5, 0), 0.0);
    }

    #[test]
    fn item_input_accepts_numbers_for_decimals() {
        let item: QuotationItemInput =
            serde_json::from_str(r#"{"item_name": "Belt", "mrp": 1250.5, "quantity": 2}"#).unwrap();
        assert_eq!(item.mrp, Some(Decimal::new(12505, 1)));
        assert_eq!(item.quantity, Some(Decimal::from(2)));
        assert!(item.id.is_none());
    }
}
