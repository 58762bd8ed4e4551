//! Lenient deserializers for spreadsheet-sourced payloads.
//!
//! Spreadsheet exports send numbers as JSON numbers, numeric strings or
//! blanks. These helpers accept all three.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// `Option<f64>` from a number, numeric string, blank string or null.
///
/// Unparsable text is treated as absent.
pub fn optional_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(value)) => Some(value),
            Some(NumberOrText::Text(text)) => text.trim().parse().ok(),
            None => None,
        },
    )
}

/// `f64` that falls back to zero for blanks and unparsable text.
pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    optional_f64(deserializer).map(|value| value.unwrap_or(0.0))
}

/// `Option<String>` from text or a number, trimmed; blanks become `None`.
pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(value)) => Some(value.to_string()),
            Some(NumberOrText::Text(text)) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            None => None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "optional_f64")]
        amount: Option<f64>,
        #[serde(default, deserialize_with = "f64_or_zero")]
        total: f64,
        #[serde(default, deserialize_with = "optional_text")]
        code: Option<String>,
    }

    #[test]
    fn accepts_numbers_and_numeric_text() {
        let row: Row =
            serde_json::from_str(r#"{"amount": "12.5", "total": 3, "code": 4521}"#).unwrap();
        assert_eq!(row.amount, Some(12.5));
        assert_eq!(row.total, 3.0);
        assert_eq!(row.code.as_deref(), Some("4521"));
    }

    #[test]
    fn blanks_become_absent() {
        let row: Row = serde_json::from_str(r#"{"amount": " ", "total": "", "code": "  "}"#).unwrap();
        assert_eq!(row.amount, None);
        assert_eq!(row.total, 0.0);
        assert_eq!(row.code, None);

        let empty: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.amount, None);
        assert_eq!(empty.total, 0.0);
    }
}
