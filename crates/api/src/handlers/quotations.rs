//! Handlers for quotations, their line items and the re-quote chain.
//!
//! A quotation whose status is `completed` is locked: header updates,
//! deletion and item status changes are rejected with 409.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::quotation::{ensure_mutable, validate_status_change, ItemStatus, QuotationStatus};
use bizdesk_core::types::DbId;
use bizdesk_db::models::quotation::{
    average_items, status_count_map, BulkItemStatusChange, CreateQuotation, ItemStatistics,
    ItemStatusChange, Quotation, QuotationItemInput, QuotationItemStatistics, QuotationStatistics,
    QuotationStatusChange, RequoteRequest, UpdateQuotation,
};
use bizdesk_db::repositories::quotation_repo::QuoteNumbering;
use bizdesk_db::repositories::QuotationRepo;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::{LimitParams, PaginationParams};
use crate::response::{DataResponse, MessageResponse, PaginatedResponse, Pagination};
use crate::state::AppState;

/// Default for `GET /quotations/recent`.
const DEFAULT_RECENT_LIMIT: i64 = 10;

/// `?status=&page=&per_page=` for the quotation list.
#[derive(Debug, Deserialize)]
pub struct ListQuotationsParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// `?q=` for quotation search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkStatusResult {
    pub updated_count: u64,
}

/// Load a quotation header or fail with 404.
async fn load(state: &AppState, id: DbId) -> AppResult<Quotation> {
    QuotationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// GET /api/v1/quotations?status&page&per_page
pub async fn list_quotations(
    State(state): State<AppState>,
    Query(params): Query<ListQuotationsParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = PaginationParams {
        page: params.page,
        per_page: params.per_page,
    };
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let total = QuotationRepo::count(&state.pool, status).await?;
    let page = QuotationRepo::list(
        &state.pool,
        status,
        pagination.per_page(),
        pagination.offset(),
    )
    .await?;
    let quotations = QuotationRepo::attach_items(&state.pool, page).await?;

    Ok(Json(PaginatedResponse::new(
        quotations,
        Pagination::new(pagination.page(), pagination.per_page(), total),
    )))
}

/// POST /api/v1/quotations
pub async fn create_quotation(
    State(state): State<AppState>,
    Json(mut input): Json<CreateQuotation>,
) -> AppResult<impl IntoResponse> {
    let company_name = input
        .company_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if company_name.is_empty() {
        return Err(AppError::BadRequest("company_name is required".into()));
    }
    if input
        .items
        .iter()
        .any(|item| item.item_name.as_deref().is_none_or(|n| n.trim().is_empty()))
    {
        return Err(AppError::BadRequest("Every item requires an item_name".into()));
    }
    if let Some(status) = input.status.as_deref() {
        status.parse::<QuotationStatus>()?;
    }
    validate_item_statuses(&input.items)?;

    let given = input
        .quote_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let numbering = match (given, input.original_quote_id) {
        (Some(number), _) => QuoteNumbering::Given(number),
        (None, Some(original_id)) => match QuotationRepo::find_by_id(&state.pool, original_id).await? {
            Some(original) => QuoteNumbering::RequoteOf(original.quote_number),
            None => {
                tracing::warn!(original_id, "Original quotation not found, generating a fresh number");
                input.original_quote_id = None;
                QuoteNumbering::Generated
            }
        },
        (None, None) => QuoteNumbering::Generated,
    };

    let created = QuotationRepo::create(&state.pool, &input, numbering).await?;

    tracing::info!(
        quotation_id = created.quotation.id,
        quote_number = %created.quotation.quote_number,
        items = created.items.len(),
        "Quotation created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(created, "Quotation created")),
    ))
}

/// Item statuses given on create or update must be in the fixed set.
fn validate_item_statuses(items: &[QuotationItemInput]) -> AppResult<()> {
    for item in items {
        item.item_status.as_deref().map(str::parse::<ItemStatus>).transpose()?;
    }
    Ok(())
}

/// GET /api/v1/quotations/{id}
pub async fn get_quotation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quotation = QuotationRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;
    Ok(Json(DataResponse::new(quotation)))
}

/// PUT /api/v1/quotations/{id}
pub async fn update_quotation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuotation>,
) -> AppResult<impl IntoResponse> {
    let existing = load(&state, id).await?;
    ensure_mutable(&existing.status, "update")?;

    if let Some(status) = input.status.as_deref() {
        status.parse::<QuotationStatus>()?;
    }
    if let Some(items) = &input.items {
        if items
            .iter()
            .any(|item| item.id.is_none() && item.item_name.as_deref().is_none_or(|n| n.trim().is_empty()))
        {
            return Err(AppError::BadRequest("New items require an item_name".into()));
        }
        validate_item_statuses(items)?;
    }

    let updated = QuotationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;

    tracing::info!(quotation_id = id, status = %updated.quotation.status, "Quotation updated");

    Ok(Json(DataResponse::with_message(updated, "Quotation updated")))
}

/// DELETE /api/v1/quotations/{id}
pub async fn delete_quotation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = load(&state, id).await?;
    ensure_mutable(&existing.status, "delete")?;

    if !QuotationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Quotation", id));
    }

    tracing::info!(quotation_id = id, quote_number = %existing.quote_number, "Quotation deleted");

    Ok(Json(MessageResponse::new("Quotation deleted")))
}

/// PATCH /api/v1/quotations/{id}/status
pub async fn update_quotation_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<QuotationStatusChange>,
) -> AppResult<impl IntoResponse> {
    let existing = load(&state, id).await?;
    let status = validate_status_change(&existing.status, input.status.trim())?;

    let quotation = QuotationRepo::set_status(
        &state.pool,
        id,
        status,
        input.requote_note.as_deref(),
        input.updated_by.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("Quotation", id))?;

    tracing::info!(
        quotation_id = id,
        from = %existing.status,
        to = %status,
        quote_number = %quotation.quote_number,
        "Quotation status changed",
    );

    Ok(Json(DataResponse::with_message(
        quotation,
        format!("Status updated to {status}"),
    )))
}

/// PATCH /api/v1/quotations/{id}/items/{item_id}/status
pub async fn update_item_status(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<ItemStatusChange>,
) -> AppResult<impl IntoResponse> {
    let existing = load(&state, id).await?;
    ensure_mutable(&existing.status, "change items of")?;
    let status: ItemStatus = input.status.trim().parse()?;

    let item = QuotationRepo::set_item_status(
        &state.pool,
        id,
        item_id,
        status,
        input.updated_by.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("QuotationItem", item_id))?;

    tracing::info!(quotation_id = id, item_id, status = %status, "Item status changed");

    Ok(Json(DataResponse::with_message(
        item,
        format!("Item status updated to {status}"),
    )))
}

/// PATCH /api/v1/quotations/{id}/items/bulk-status
pub async fn bulk_item_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BulkItemStatusChange>,
) -> AppResult<impl IntoResponse> {
    let existing = load(&state, id).await?;
    ensure_mutable(&existing.status, "change items of")?;
    if input.item_ids.is_empty() {
        return Err(AppError::BadRequest("item_ids must not be empty".into()));
    }
    let status: ItemStatus = input.status.trim().parse()?;

    let updated_count = QuotationRepo::set_items_status(
        &state.pool,
        id,
        &input.item_ids,
        status,
        input.updated_by.as_deref(),
    )
    .await?;

    tracing::info!(
        quotation_id = id,
        requested = input.item_ids.len(),
        updated_count,
        status = %status,
        "Bulk item status changed",
    );

    Ok(Json(DataResponse::with_message(
        BulkStatusResult { updated_count },
        format!("{updated_count} items updated to {status}"),
    )))
}

/// GET /api/v1/quotations/{id}/item-statistics
pub async fn item_statistics(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quotation = load(&state, id).await?;
    let counts = QuotationRepo::item_status_counts(&state.pool, Some(id)).await?;
    let total_items = QuotationRepo::count_items(&state.pool, Some(id)).await?;

    let known: Vec<&str> = ItemStatus::ALL.iter().map(|s| s.as_str()).collect();
    Ok(Json(DataResponse::new(QuotationItemStatistics {
        quotation_id: quotation.id,
        quote_number: quotation.quote_number,
        total_items,
        status_counts: status_count_map(&known, &counts),
    })))
}

/// GET /api/v1/quotations/{id}/export
///
/// The full quotation document (header, issuer details and items) for
/// rendering on the client.
pub async fn export_quotation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let quotation = QuotationRepo::find_with_items(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quotation", id))?;

    tracing::debug!(quotation_id = id, "Quotation exported");

    Ok(Json(DataResponse::new(quotation)))
}

/// GET /api/v1/quotations/statistics
pub async fn quotation_statistics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (year, month) = QuotationRepo::current_period();

    let total = QuotationRepo::count(&state.pool, None).await?;
    let status_counts = QuotationRepo::status_counts(&state.pool).await?;
    let monthly = QuotationRepo::monthly_totals(&state.pool, year).await?;
    let item_counts = QuotationRepo::item_status_counts(&state.pool, None).await?;
    let total_items = QuotationRepo::count_items(&state.pool, None).await?;

    let known_statuses: Vec<&str> = QuotationStatus::ALL.iter().map(|s| s.as_str()).collect();
    let known_item_statuses: Vec<&str> = ItemStatus::ALL.iter().map(|s| s.as_str()).collect();

    let monthly_totals = monthly
        .iter()
        .map(|row| (row.month, to_f64(row.total)))
        .collect::<std::collections::BTreeMap<_, _>>();
    let current_month_revenue = monthly_totals
        .get(&(month as i32))
        .copied()
        .unwrap_or_default();

    Ok(Json(DataResponse::new(QuotationStatistics {
        total,
        status_counts: status_count_map(&known_statuses, &status_counts),
        monthly_totals,
        current_month_revenue,
        year,
        item_statistics: ItemStatistics {
            total_items,
            avg_items_per_quotation: average_items(total_items, total),
            status_counts: status_count_map(&known_item_statuses, &item_counts),
        },
    })))
}

/// GET /api/v1/quotations/search?q
pub async fn search_quotations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let term = params.q.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Err(AppError::BadRequest("Search query 'q' is required".into()));
    }

    let found = QuotationRepo::search(&state.pool, term).await?;
    let quotations = QuotationRepo::attach_items(&state.pool, found).await?;
    Ok(Json(DataResponse::new(quotations)))
}

/// GET /api/v1/quotations/recent?limit
pub async fn recent_quotations(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT).max(1);
    let recent = QuotationRepo::recent(&state.pool, limit).await?;
    Ok(Json(DataResponse::new(recent)))
}

/// POST /api/v1/quotations/{id}/requote
pub async fn create_requote(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RequoteRequest>,
) -> AppResult<impl IntoResponse> {
    let source = load(&state, id).await?;
    if input.update_original_status {
        ensure_mutable(&source.status, "re-quote")?;
    }

    let requote = QuotationRepo::create_requote(&state.pool, &source, &input).await?;

    tracing::info!(
        source_id = id,
        requote_id = requote.quotation.id,
        quote_number = %requote.quotation.quote_number,
        source_marked = input.update_original_status,
        "Re-quote created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(requote, "Re-quote created")),
    ))
}

/// GET /api/v1/quotations/{id}/requotes
pub async fn list_requotes(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load(&state, id).await?;
    let requotes = QuotationRepo::list_requotes(&state.pool, id).await?;
    Ok(Json(DataResponse::new(requotes)))
}
