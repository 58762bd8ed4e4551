//! Inventory models: stock on hand, stock sold, goods received notes and
//! the MRP price list.

use bizdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::de::{optional_f64, optional_text};

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// A row from the `stock` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Stock {
    pub id: DbId,
    pub item_name: Option<String>,
    pub brand: Option<String>,
    pub brand_code: Option<String>,
    pub brand_description: Option<String>,
    pub hsn: Option<String>,
    pub batch_code: Option<String>,
    pub mrp: Option<f64>,
    pub buy_price: Option<f64>,
    pub width: Option<String>,
    pub length: Option<String>,
    pub unit: Option<String>,
    pub gst: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One spreadsheet row of `POST /stock/bulk-save`.
///
/// Accepts the sheet's column headers as well as snake_case keys. Text is
/// trimmed and blanks are stored as `NULL`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StockRecord {
    #[serde(alias = "Item Name", deserialize_with = "optional_text")]
    pub item_name: Option<String>,
    #[serde(alias = "Brand", deserialize_with = "optional_text")]
    pub brand: Option<String>,
    #[serde(alias = "Brand Code", deserialize_with = "optional_text")]
    pub brand_code: Option<String>,
    #[serde(alias = "Brand Description", deserialize_with = "optional_text")]
    pub brand_description: Option<String>,
    #[serde(alias = "HSN", deserialize_with = "optional_text")]
    pub hsn: Option<String>,
    #[serde(alias = "Batch Code", deserialize_with = "optional_text")]
    pub batch_code: Option<String>,
    #[serde(alias = "MRP", deserialize_with = "optional_f64")]
    pub mrp: Option<f64>,
    #[serde(alias = "Buy Price", deserialize_with = "optional_f64")]
    pub buy_price: Option<f64>,
    #[serde(alias = "Width", deserialize_with = "optional_text")]
    pub width: Option<String>,
    #[serde(alias = "Length", deserialize_with = "optional_text")]
    pub length: Option<String>,
    #[serde(alias = "Unit", deserialize_with = "optional_text")]
    pub unit: Option<String>,
    #[serde(alias = "GST", deserialize_with = "optional_f64")]
    pub gst: Option<f64>,
}

/// Body of `POST /stock/bulk-save`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkSaveStock {
    #[serde(default)]
    pub records: Vec<StockRecord>,
}

/// One entry of `PUT /stock/bulk-update`, keyed by brand code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StockPriceUpdate {
    #[serde(alias = "Brand Code", deserialize_with = "optional_text")]
    pub brand_code: Option<String>,
    #[serde(alias = "MRP", deserialize_with = "optional_f64")]
    pub mrp: Option<f64>,
    #[serde(alias = "Buy Price", deserialize_with = "optional_f64")]
    pub buy_price: Option<f64>,
    #[serde(alias = "GST", deserialize_with = "optional_f64")]
    pub gst: Option<f64>,
    #[serde(alias = "Brand Description", deserialize_with = "optional_text")]
    pub brand_description: Option<String>,
    #[serde(alias = "Item Name", deserialize_with = "optional_text")]
    pub item_name: Option<String>,
}

/// Body of `PUT /stock/bulk-update`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateStock {
    #[serde(default)]
    pub records: Vec<StockPriceUpdate>,
}

/// Outcome of a bulk price update. Every input record appears in exactly
/// one of the two lists; records without a brand code count as not found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkUpdateReport {
    pub updated: Vec<String>,
    pub not_found: Vec<String>,
    pub rows_updated: u64,
}

// ---------------------------------------------------------------------------
// Stock sold
// ---------------------------------------------------------------------------

/// A row from the `stock_sold` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StockSold {
    pub id: DbId,
    pub item_name: Option<String>,
    pub sold_qty: Option<f64>,
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateStockSold {
    pub item_name: Option<String>,
    #[serde(deserialize_with = "optional_f64")]
    pub sold_qty: Option<f64>,
    pub date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub remarks: Option<String>,
}

// ---------------------------------------------------------------------------
// Goods received notes
// ---------------------------------------------------------------------------

/// A row from the `grn` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grn {
    pub id: DbId,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_part_no: Option<String>,
    pub customer_description: Option<String>,
    pub item_name: Option<String>,
    pub brand: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub buy_price: Option<f64>,
    pub batch_code: Option<String>,
    pub created_at: Timestamp,
}

/// Invoice-level fields shared by every line of a GRN.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GrnHeader {
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub customer_name: Option<String>,
    pub customer_part_no: Option<String>,
    pub customer_description: Option<String>,
}

/// Item-level fields of one GRN line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GrnItem {
    pub item_name: Option<String>,
    pub brand: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub length: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub width: Option<String>,
    #[serde(deserialize_with = "optional_f64")]
    pub buy_price: Option<f64>,
    pub batch_code: Option<String>,
}

/// Body of `POST /grn`: a single line with its header.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGrn {
    #[serde(flatten)]
    pub header: GrnHeader,
    #[serde(flatten)]
    pub item: GrnItem,
}

/// Body of `POST /grn/batch`: one header, many lines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGrnBatch {
    #[serde(flatten)]
    pub header: GrnHeader,
    #[serde(default)]
    pub items: Vec<GrnItem>,
}

// ---------------------------------------------------------------------------
// MRP price list
// ---------------------------------------------------------------------------

/// A row from the `mrp_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MrpProduct {
    pub id: DbId,
    pub item_name: Option<String>,
    pub brand: String,
    pub brand_code: Option<String>,
    pub brand_description: Option<String>,
    pub mrp: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `PUT /mrp/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMrpProduct {
    pub item_name: Option<String>,
    pub brand: Option<String>,
    pub brand_code: Option<String>,
    pub brand_description: Option<String>,
    #[serde(deserialize_with = "optional_f64")]
    pub mrp: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_record_reads_spreadsheet_headers() {
        let record: StockRecord = serde_json::from_str(
            r#"{"Item Name": " V-Belt A42 ", "Brand Code": "FN-A42", "MRP": "450",
                "GST": 18, "HSN": "", "Width": 13}"#,
        )
        .unwrap();
        assert_eq!(record.item_name.as_deref(), Some("V-Belt A42"));
        assert_eq!(record.brand_code.as_deref(), Some("FN-A42"));
        assert_eq!(record.mrp, Some(450.0));
        assert_eq!(record.gst, Some(18.0));
        assert_eq!(record.hsn, None);
        assert_eq!(record.width.as_deref(), Some("13"));
    }

    #[test]
    fn stock_record_reads_snake_case() {
        let record: StockRecord =
            serde_json::from_str(r#"{"item_name": "Pulley", "buy_price": 120.5}"#).unwrap();
        assert_eq!(record.item_name.as_deref(), Some("Pulley"));
        assert_eq!(record.buy_price, Some(120.5));
    }

    #[test]
    fn grn_batch_shares_header() {
        let batch: CreateGrnBatch = serde_json::from_str(
            r#"{"invoice_number": "INV-7", "invoice_date": "2025-03-04",
                "items": [{"item_name": "Belt", "buy_price": "99"}, {"item_name": "Pulley"}]}"#,
        )
        .unwrap();
        assert_eq!(batch.header.invoice_number.as_deref(), Some("INV-7"));
        assert_eq!(batch.items.len(), 2);
        assert_eq!(batch.items[0].buy_price, Some(99.0));
    }
}
