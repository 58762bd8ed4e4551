//! Route definitions for inventory.
//!
//! ```text
//! STOCK:
//! GET    /                              list_stock
//! POST   /bulk-save                     bulk_save_stock
//! PUT    /bulk-update                   bulk_update_stock
//! GET    /{id}                          get_stock
//! DELETE /{id}                          delete_stock
//!
//! STOCK SOLD:
//! GET    /                              list_stock_sold
//! POST   /                              create_stock_sold
//!
//! GRN:
//! GET    /                              list_grn
//! POST   /                              create_grn
//! POST   /batch                         create_grn_batch
//!
//! MRP:
//! GET    /                              list_mrp
//! POST   /import                        import_mrp (multipart)
//! GET    /unmatched                     unmatched_brands
//! PUT    /{id}                          update_mrp
//! DELETE /{id}                          delete_mrp
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::stock;
use crate::state::AppState;

/// Stock routes, mounted at `/stock`.
pub fn stock_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stock::list_stock))
        .route("/bulk-save", post(stock::bulk_save_stock))
        .route("/bulk-update", put(stock::bulk_update_stock))
        .route(
            "/{id}",
            get(stock::get_stock).delete(stock::delete_stock),
        )
}

/// Stock-sold routes, mounted at `/stock-sold`.
pub fn stock_sold_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(stock::list_stock_sold).post(stock::create_stock_sold),
    )
}

/// Goods received note routes, mounted at `/grn`.
pub fn grn_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stock::list_grn).post(stock::create_grn))
        .route("/batch", post(stock::create_grn_batch))
}

/// MRP price-list routes, mounted at `/mrp`.
pub fn mrp_router() -> Router<AppState> {
    Router::new()
        .route("/", get(stock::list_mrp))
        .route("/import", post(stock::import_mrp))
        .route("/unmatched", get(stock::unmatched_brands))
        .route("/{id}", put(stock::update_mrp).delete(stock::delete_mrp))
}
