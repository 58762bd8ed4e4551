//! MRP price-list import from CSV.
//!
//! Header names are normalized to lower_snake_case (`"Brand Code"` becomes
//! `brand_code`). The sheet must contain `brand` and `mrp` columns; rows
//! with a blank brand or an unparsable MRP are skipped rather than failing
//! the whole import.

use serde::Serialize;

use crate::error::CoreError;

/// One accepted price-list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceListRow {
    pub brand: String,
    pub mrp: f64,
    pub item_name: Option<String>,
    pub brand_code: Option<String>,
    pub brand_description: Option<String>,
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn is_blank(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan")
}

/// Parse a CSV price list.
pub fn parse_price_list(bytes: &[u8]) -> Result<Vec<PriceListRow>, CoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::Validation(format!("Cannot read price list: {e}")))?
        .iter()
        .map(normalize_header)
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(brand_col), Some(mrp_col)) = (column("brand"), column("mrp")) else {
        return Err(CoreError::Validation(
            "Price list must contain 'brand' and 'mrp' columns".into(),
        ));
    };
    let item_col = column("item_name");
    let code_col = column("brand_code");
    let description_col = column("brand_description");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| CoreError::Validation(format!("Cannot read price list: {e}")))?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .filter(|v| !is_blank(v))
                .map(str::to_string)
        };

        let Some(brand) = field(Some(brand_col)) else {
            continue;
        };
        let Some(mrp) = field(Some(mrp_col)).and_then(|v| v.parse::<f64>().ok()) else {
            continue;
        };

        rows.push(PriceListRow {
            brand,
            mrp,
            item_name: field(item_col),
            brand_code: field(code_col),
            brand_description: field(description_col),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_rows_and_skips_bad_ones() {
        let csv = "Brand,MRP,Brand Code\n\
                   Apex, 120.50 ,AX-1\n\
                   nan,99,\n\
                   ,10,\n\
                   Zenith,abc,Z-1\n\
                   Zenith,75,\n";
        let rows = parse_price_list(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].brand, "Apex");
        assert_eq!(rows[0].mrp, 120.5);
        assert_eq!(rows[0].brand_code.as_deref(), Some("AX-1"));
        assert_eq!(rows[1].brand, "Zenith");
        assert_eq!(rows[1].brand_code, None);
    }

    #[test]
    fn missing_required_columns_is_rejected() {
        let csv = "Brand,Price\nApex,10\n";
        assert_matches!(parse_price_list(csv.as_bytes()), Err(CoreError::Validation(_)));
    }
}
