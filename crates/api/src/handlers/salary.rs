//! Generic handlers for the three monthly payroll sheets.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::calendar::MonthPeriod;
use bizdesk_db::models::salary::{SalarySheet, SaveSalarySheet};
use bizdesk_db::repositories::SalaryRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of saving one month of a sheet.
#[derive(Debug, Serialize)]
pub struct SavedSheet {
    pub month: i32,
    pub year: i32,
    pub saved: u64,
}

/// POST /api/v1/salary/{variant}/save
///
/// Replaces the whole month in one transaction.
pub async fn save_sheet<S: SalarySheet>(
    State(state): State<AppState>,
    Json(input): Json<SaveSalarySheet<S::Input>>,
) -> AppResult<impl IntoResponse> {
    let period = MonthPeriod::new(input.month, input.year)?;
    if input.records.is_empty() {
        return Err(AppError::BadRequest("No salary records provided".into()));
    }

    let saved = SalaryRepo::replace_month::<S>(&state.pool, period, &input.records).await?;

    tracing::info!(
        sheet = S::TABLE,
        month = period.month,
        year = period.year,
        saved,
        "Salary sheet saved",
    );

    Ok(Json(DataResponse::with_message(
        SavedSheet {
            month: period.month,
            year: period.year,
            saved,
        },
        format!("{} salary data saved", S::LABEL),
    )))
}

/// GET /api/v1/salary/{variant}?month&year
pub async fn list_month<S: SalarySheet>(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = MonthPeriod::new(params.month, params.year)?;
    let rows = SalaryRepo::list_month::<S>(&state.pool, period).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /api/v1/salary/{variant}/all
pub async fn list_all<S: SalarySheet>(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = SalaryRepo::list_all::<S>(&state.pool).await?;
    Ok(Json(DataResponse::new(rows)))
}
