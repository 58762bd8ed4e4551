//! Route definitions for quotations.
//!
//! ```text
//! GET    /?status&page&per_page         list_quotations
//! POST   /                              create_quotation
//! GET    /statistics                    quotation_statistics
//! GET    /search?q                      search_quotations
//! GET    /recent?limit                  recent_quotations
//! GET    /{id}                          get_quotation
//! PUT    /{id}                          update_quotation
//! DELETE /{id}                          delete_quotation
//! PATCH  /{id}/status                   update_quotation_status
//! PATCH  /{id}/items/bulk-status        bulk_item_status
//! PATCH  /{id}/items/{item_id}/status   update_item_status
//! GET    /{id}/item-statistics          item_statistics
//! GET    /{id}/export                   export_quotation
//! POST   /{id}/requote                  create_requote
//! GET    /{id}/requotes                 list_requotes
//! ```

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::quotations;
use crate::state::AppState;

/// Quotation routes, mounted at `/quotations`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(quotations::list_quotations).post(quotations::create_quotation),
        )
        .route("/statistics", get(quotations::quotation_statistics))
        .route("/search", get(quotations::search_quotations))
        .route("/recent", get(quotations::recent_quotations))
        .route(
            "/{id}",
            get(quotations::get_quotation)
                .put(quotations::update_quotation)
                .delete(quotations::delete_quotation),
        )
        .route("/{id}/status", patch(quotations::update_quotation_status))
        .route("/{id}/items/bulk-status", patch(quotations::bulk_item_status))
        .route(
            "/{id}/items/{item_id}/status",
            patch(quotations::update_item_status),
        )
        .route("/{id}/item-statistics", get(quotations::item_statistics))
        .route("/{id}/export", get(quotations::export_quotation))
        .route("/{id}/requote", post(quotations::create_requote))
        .route("/{id}/requotes", get(quotations::list_requotes))
}
