use std::sync::Arc;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: bizdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// On-disk store for employee documents and visit-report attachments.
    pub uploads: Arc<UploadStore>,
}
