//! Handlers for stock, sales, goods received notes and the MRP price list.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::price_list::parse_price_list;
use bizdesk_core::types::DbId;
use bizdesk_db::models::stock::{
    BulkSaveStock, BulkUpdateStock, CreateGrn, CreateGrnBatch, CreateStockSold, UpdateMrpProduct,
};
use bizdesk_db::repositories::{GrnRepo, MrpRepo, StockRepo, StockSoldRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::form::FormData;
use crate::response::{CountedResponse, DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InsertedCount {
    pub inserted: u64,
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// POST /api/v1/stock/bulk-save
pub async fn bulk_save_stock(
    State(state): State<AppState>,
    Json(input): Json<BulkSaveStock>,
) -> AppResult<impl IntoResponse> {
    if input.records.is_empty() {
        return Err(AppError::BadRequest("No stock records provided".into()));
    }

    let inserted = StockRepo::bulk_insert(&state.pool, &input.records).await?;

    tracing::info!(inserted, "Stock records saved");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            InsertedCount { inserted },
            format!("{inserted} stock records saved"),
        )),
    ))
}

/// GET /api/v1/stock
pub async fn list_stock(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = StockRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/v1/stock/{id}
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = StockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Stock", id))?;
    Ok(Json(DataResponse::new(row)))
}

/// DELETE /api/v1/stock/{id}
pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StockRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Stock", id));
    }

    tracing::info!(stock_id = id, "Stock record deleted");

    Ok(Json(MessageResponse::new("Stock record deleted")))
}

/// PUT /api/v1/stock/bulk-update
///
/// Every input record lands in exactly one of `updated` / `not_found`.
pub async fn bulk_update_stock(
    State(state): State<AppState>,
    Json(input): Json<BulkUpdateStock>,
) -> AppResult<impl IntoResponse> {
    if input.records.is_empty() {
        return Err(AppError::BadRequest("No stock records provided".into()));
    }

    let report = StockRepo::bulk_update_prices(&state.pool, &input.records).await?;

    tracing::info!(
        updated = report.updated.len(),
        not_found = report.not_found.len(),
        rows = report.rows_updated,
        "Stock prices updated",
    );

    let message = format!(
        "{} brand codes updated, {} not found",
        report.updated.len(),
        report.not_found.len()
    );
    Ok(Json(DataResponse::with_message(report, message)))
}

// ---------------------------------------------------------------------------
// Stock sold
// ---------------------------------------------------------------------------

/// POST /api/v1/stock-sold
pub async fn create_stock_sold(
    State(state): State<AppState>,
    Json(input): Json<CreateStockSold>,
) -> AppResult<impl IntoResponse> {
    let row = StockSoldRepo::create(&state.pool, &input).await?;

    tracing::info!(stock_sold_id = row.id, "Stock sale recorded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(row, "Stock sale recorded")),
    ))
}

/// GET /api/v1/stock-sold
pub async fn list_stock_sold(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = StockSoldRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(rows)))
}

// ---------------------------------------------------------------------------
// Goods received notes
// ---------------------------------------------------------------------------

/// POST /api/v1/grn
pub async fn create_grn(
    State(state): State<AppState>,
    Json(input): Json<CreateGrn>,
) -> AppResult<impl IntoResponse> {
    let row = GrnRepo::create(&state.pool, &input.header, &input.item).await?;

    tracing::info!(grn_id = row.id, "GRN created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(row, "GRN created")),
    ))
}

/// POST /api/v1/grn/batch
///
/// One invoice header shared by several items.
pub async fn create_grn_batch(
    State(state): State<AppState>,
    Json(input): Json<CreateGrnBatch>,
) -> AppResult<impl IntoResponse> {
    if input.items.is_empty() {
        return Err(AppError::BadRequest("No GRN items provided".into()));
    }

    let rows = GrnRepo::create_many(&state.pool, &input.header, &input.items).await?;

    tracing::info!(
        count = rows.len(),
        invoice_number = ?input.header.invoice_number,
        "GRN batch created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(rows, "GRN batch created")),
    ))
}

/// GET /api/v1/grn
pub async fn list_grn(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = GrnRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(rows)))
}

// ---------------------------------------------------------------------------
// MRP price list
// ---------------------------------------------------------------------------

/// POST /api/v1/mrp/import
///
/// Multipart CSV upload in the `file` field.
pub async fn import_mrp(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::read(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let rows = parse_price_list(&file.bytes)?;
    if rows.is_empty() {
        return Err(AppError::BadRequest(
            "The price list contains no valid rows".into(),
        ));
    }

    let inserted = MrpRepo::import(&state.pool, &rows).await?;

    tracing::info!(file = %file.file_name, inserted = inserted.len(), "MRP price list imported");

    Ok((
        StatusCode::CREATED,
        Json(CountedResponse::new(inserted)),
    ))
}

/// GET /api/v1/mrp
pub async fn list_mrp(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = MrpRepo::list(&state.pool).await?;
    Ok(Json(CountedResponse::new(rows)))
}

/// PUT /api/v1/mrp/{id}
pub async fn update_mrp(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMrpProduct>,
) -> AppResult<impl IntoResponse> {
    let row = MrpRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("MrpProduct", id))?;

    tracing::info!(mrp_id = id, "MRP product updated");

    Ok(Json(DataResponse::with_message(row, "MRP product updated")))
}

/// DELETE /api/v1/mrp/{id}
pub async fn delete_mrp(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !MrpRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("MrpProduct", id));
    }

    tracing::info!(mrp_id = id, "MRP product deleted");

    Ok(Json(MessageResponse::new("MRP product deleted")))
}

/// GET /api/v1/mrp/unmatched
///
/// Stock brands (trimmed, lower-cased) with no price-list entry.
pub async fn unmatched_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = MrpRepo::unmatched_brands(&state.pool).await?;
    Ok(Json(CountedResponse::new(brands)))
}
