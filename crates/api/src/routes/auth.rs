//! Route definitions for user accounts.
//!
//! ```text
//! POST   /register                      register
//! POST   /login                         login
//! POST   /profile                       profile
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth routes, mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", post(auth::profile))
}
