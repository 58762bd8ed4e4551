//! Route definitions for the organisation lookup tables.
//!
//! Each table is mounted with the same shape:
//!
//! ```text
//! GET    /                              list
//! POST   /                              create
//! GET    /{id}                          get
//! PUT    /{id}                          update
//! DELETE /{id}                          delete
//! ```

use axum::routing::get;
use axum::Router;
use bizdesk_db::models::lookup::LookupTable;

use crate::handlers::lookups;
use crate::state::AppState;

/// Routes for one lookup table, e.g. `router::<Department>()` at `/departments`.
pub fn router<T: LookupTable>() -> Router<AppState> {
    Router::new()
        .route("/", get(lookups::list::<T>).post(lookups::create::<T>))
        .route(
            "/{id}",
            get(lookups::get::<T>)
                .put(lookups::update::<T>)
                .delete(lookups::delete::<T>),
        )
}
