//! Local-disk storage for uploaded documents.
//!
//! Stored paths are relative to the upload root and are what the database
//! keeps; they are served back under `/api/v1/uploads/{path}`.

use std::io;
use std::path::PathBuf;

use bizdesk_core::uploads::sanitize_filename;

/// Writes and removes files below a fixed root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `bytes` to `dir/name` below the root, creating `dir` if needed.
    ///
    /// `name` is sanitized again so callers cannot escape the root. Returns
    /// the stored relative path.
    pub async fn save(&self, dir: Option<&str>, name: &str, bytes: &[u8]) -> io::Result<String> {
        let name = sanitize_filename(name);
        if name.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty file name"));
        }

        let relative = match dir {
            Some(dir) => format!("{dir}/{name}"),
            None => name,
        };
        let target = self.root.join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;

        tracing::debug!(path = %relative, size = bytes.len(), "Stored upload");
        Ok(relative)
    }

    /// Delete a previously stored file. Failures are logged, not returned.
    pub async fn remove(&self, relative: &str) {
        if relative.split(['/', '\\']).any(|part| part == "..") {
            tracing::warn!(path = %relative, "Refusing to remove path outside upload root");
            return;
        }
        let target = self.root.join(relative);
        match tokio::fs::remove_file(&target).await {
            Ok(()) => tracing::debug!(path = %relative, "Removed upload"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %relative, error = %e, "Failed to remove upload"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_remove_round_trip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        let store = UploadStore::new(root);

        let path = store
            .save(Some("visit_reports"), "site plan.pdf", b"%PDF")
            .await
            .unwrap();
        assert_eq!(path, "visit_reports/site_plan.pdf");
        assert_eq!(tokio::fs::read(root.join(&path)).await.unwrap(), b"%PDF");

        store.remove(&path).await;
        assert!(!root.join(&path).exists());
    }

    #[tokio::test]
    async fn save_rejects_names_that_sanitize_to_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = UploadStore::new(dir.path());
        let err = store.save(None, "???", b"x").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
