//! Handlers for the monthly holiday calendar.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::calendar::MonthPeriod;
use bizdesk_core::types::DbId;
use bizdesk_db::models::holiday::SaveHolidays;
use bizdesk_db::repositories::HolidayRepo;

use crate::error::{AppError, AppResult};
use crate::query::PeriodParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/v1/holidays?month&year
pub async fn list_holidays(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = MonthPeriod::new(params.month, params.year)?;
    let holidays = HolidayRepo::list_month(&state.pool, period).await?;
    Ok(Json(DataResponse::new(holidays)))
}

/// PUT /api/v1/holidays
///
/// Replaces the month's holidays; every date must fall inside the month.
pub async fn save_holidays(
    State(state): State<AppState>,
    Json(input): Json<SaveHolidays>,
) -> AppResult<impl IntoResponse> {
    let period = MonthPeriod::new(input.month, input.year)?;
    if let Some(outside) = input.holidays.iter().find(|d| !period.contains(**d)) {
        return Err(AppError::BadRequest(format!(
            "Holiday {outside} is outside {}-{:02}",
            period.year, period.month
        )));
    }

    let saved = HolidayRepo::replace_month(&state.pool, period, &input.holidays).await?;

    tracing::info!(
        month = period.month,
        year = period.year,
        count = saved.len(),
        "Holidays replaced",
    );

    Ok(Json(DataResponse::with_message(saved, "Holidays saved")))
}

/// DELETE /api/v1/holidays/{id}
pub async fn delete_holiday(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !HolidayRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Holiday", id));
    }

    tracing::info!(holiday_id = id, "Holiday deleted");

    Ok(Json(MessageResponse::new("Holiday deleted")))
}
