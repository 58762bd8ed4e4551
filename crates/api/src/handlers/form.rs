//! Buffered multipart form parsing shared by the upload handlers.

use std::collections::HashMap;

use axum::extract::Multipart;
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// A file part of a multipart form.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Text fields and file parts of one multipart request.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    files: HashMap<String, FilePart>,
}

impl FormData {
    /// Read every part. Parts with a file name are files; empty file parts
    /// (a form submitted without choosing a file) are dropped.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = FormData::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if !bytes.is_empty() && !file_name.is_empty() {
                        form.files.insert(
                            name,
                            FilePart {
                                file_name,
                                bytes: bytes.to_vec(),
                            },
                        );
                    }
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    /// Trimmed text value; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trimmed text value that must be present.
    pub fn required(&self, name: &str) -> AppResult<String> {
        self.text(name)
            .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))
    }

    /// Optional `YYYY-MM-DD` date.
    pub fn date(&self, name: &str) -> AppResult<Option<NaiveDate>> {
        self.text(name)
            .map(|raw| parse_date(name, &raw))
            .transpose()
    }

    pub fn take_file(&mut self, name: &str) -> Option<FilePart> {
        self.files.remove(name)
    }
}

/// Parse a `YYYY-MM-DD` date, naming the field on failure.
pub fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{field} must be a date in YYYY-MM-DD format")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_treats_blank_as_absent() {
        let mut form = FormData::default();
        form.fields.insert("name".into(), "  Ana ".into());
        form.fields.insert("pan".into(), "   ".into());

        assert_eq!(form.text("name").as_deref(), Some("Ana"));
        assert!(form.text("pan").is_none());
        assert!(form.required("pan").is_err());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("dob", "1990-04-01").is_ok());
        assert!(parse_date("dob", "01/04/1990").is_err());
    }
}
