use std::path::PathBuf;
use std::str::FromStr;

/// Default request body ceiling: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server configuration read from the environment (and `.env`).
///
/// | Env Var                | Default                    |
/// |------------------------|----------------------------|
/// | `HOST`                 | `0.0.0.0`                  |
/// | `PORT`                 | `3000`                     |
/// | `CORS_ORIGINS`         | `http://localhost:5173`    |
/// | `REQUEST_TIMEOUT_SECS` | `30`                       |
/// | `UPLOAD_DIR`           | `uploads`                  |
/// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in `CORS_ORIGINS`; blanks are dropped.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Root of the stored employee documents and visit-report attachments.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration, panicking on malformed numeric values.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            upload_dir: env_or("UPLOAD_DIR", PathBuf::from("uploads")),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
