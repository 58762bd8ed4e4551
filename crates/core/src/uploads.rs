//! Naming rules for uploaded documents.
//!
//! Uploaded files are stored flat inside a per-kind directory. Names are
//! reduced to a safe ASCII subset so a client-supplied filename can never
//! escape the upload root.

/// Extensions accepted for employee documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "pdf"];

/// Subdirectory (below the upload root) holding visit-report attachments.
pub const VISIT_REPORT_DIR: &str = "visit_reports";

/// Employee document slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeDocument {
    Photo,
    PanAttachment,
    AadharAttachment,
}

impl EmployeeDocument {
    pub const ALL: [EmployeeDocument; 3] = [
        EmployeeDocument::Photo,
        EmployeeDocument::PanAttachment,
        EmployeeDocument::AadharAttachment,
    ];

    /// Multipart field name carrying this document.
    pub fn field_name(self) -> &'static str {
        match self {
            EmployeeDocument::Photo => "photo",
            EmployeeDocument::PanAttachment => "pan_attachment",
            EmployeeDocument::AadharAttachment => "aadhar_attachment",
        }
    }

    /// Prefix of the stored filename.
    pub fn prefix(self) -> &'static str {
        match self {
            EmployeeDocument::Photo => "photo",
            EmployeeDocument::PanAttachment => "pan",
            EmployeeDocument::AadharAttachment => "aadhar",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|doc| doc.field_name() == name)
    }
}

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`.
///
/// Path separators and whitespace become underscores, other characters
/// are dropped, and leading/trailing dots and underscores are trimmed.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mapped: String = base
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '-' | '_' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    mapped.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Lower-cased extension of a filename, if any.
pub fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether `name` carries an extension from `allowed`.
pub fn has_allowed_extension(name: &str, allowed: &[&str]) -> bool {
    extension(name).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// Stored filename for an employee document, or `None` when the upload is
/// not an accepted document type.
pub fn employee_document_name(doc: EmployeeDocument, email: &str, filename: &str) -> Option<String> {
    let clean = sanitize_filename(filename);
    if clean.is_empty() || !has_allowed_extension(&clean, DOCUMENT_EXTENSIONS) {
        return None;
    }
    let owner = sanitize_filename(email);
    Some(format!("{}_{owner}_{clean}", doc.prefix()))
}
