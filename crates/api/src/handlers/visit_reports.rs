//! Handlers for field visit reports.
//!
//! Create and update take `multipart/form-data` with an optional
//! `attachment` file.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::types::{DbId, Timestamp};
use bizdesk_core::uploads::VISIT_REPORT_DIR;
use bizdesk_db::models::visit_report::{CreateVisitReport, UpdateVisitReport, DEFAULT_CREATOR};
use bizdesk_db::repositories::VisitReportRepo;
use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::form::{parse_date, FormData};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TermParams {
    pub term: Option<String>,
}

/// Store the form's attachment, if any, as `visit_reports/{millis}_{name}`.
async fn store_attachment(state: &AppState, form: &mut FormData) -> AppResult<Option<String>> {
    let Some(file) = form.take_file("attachment") else {
        return Ok(None);
    };
    let name = format!("{}_{}", chrono::Utc::now().timestamp_millis(), file.file_name);
    let path = state
        .uploads
        .save(Some(VISIT_REPORT_DIR), &name, &file.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store attachment: {e}")))?;
    Ok(Some(path))
}

/// Midnight UTC at the start of `date`.
fn start_of(date: NaiveDate) -> Timestamp {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// POST /api/v1/visit-reports
pub async fn create_visit_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::read(multipart).await?;

    let input = CreateVisitReport {
        company_name: form.required("company_name")?,
        company_address: form.text("company_address"),
        pin_code: form.text("pin_code"),
        industry_segment: form.text("industry_segment"),
        customer_name: form.text("customer_name"),
        customer_mobile: form.required("customer_mobile")?,
        customer_email: form.text("customer_email"),
        department: form.text("department"),
        notes: form.text("notes"),
        attachment: None,
        created_by: form
            .text("created_by")
            .unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
    };
    let attachment = store_attachment(&state, &mut form).await?;
    let input = CreateVisitReport {
        attachment: attachment.clone(),
        ..input
    };

    let report = match VisitReportRepo::create(&state.pool, &input).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(path) = &attachment {
                state.uploads.remove(path).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!(visit_report_id = report.id, "Visit report created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(report, "Visit report created")),
    ))
}

/// GET /api/v1/visit-reports
pub async fn list_visit_reports(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reports = VisitReportRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(reports)))
}

/// GET /api/v1/visit-reports/{id}
pub async fn get_visit_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = VisitReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("VisitReport", id))?;
    Ok(Json(DataResponse::new(report)))
}

/// GET /api/v1/visit-reports/by-user/{username}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let reports = VisitReportRepo::list_by_creator(&state.pool, username.trim()).await?;
    Ok(Json(DataResponse::new(reports)))
}

/// GET /api/v1/visit-reports/search?start_date&end_date
///
/// Both dates are required; the end date is inclusive.
pub async fn search_by_date(
    State(state): State<AppState>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<impl IntoResponse> {
    let (Some(start), Some(end)) = (params.start_date.as_deref(), params.end_date.as_deref())
    else {
        return Err(AppError::BadRequest(
            "start_date and end_date are required".into(),
        ));
    };
    let start = parse_date("start_date", start)?;
    let end = parse_date("end_date", end)?;
    if end < start {
        return Err(AppError::BadRequest(
            "end_date must not be before start_date".into(),
        ));
    }
    let until = end
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::BadRequest("end_date is out of range".into()))?;

    let reports =
        VisitReportRepo::list_created_between(&state.pool, start_of(start), start_of(until))
            .await?;
    Ok(Json(DataResponse::new(reports)))
}

/// GET /api/v1/visit-reports/search-name?term
///
/// A blank term yields an empty list.
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(params): Query<TermParams>,
) -> AppResult<impl IntoResponse> {
    let term = params.term.as_deref().map(str::trim).unwrap_or_default();
    if term.is_empty() {
        return Ok(Json(DataResponse::new(Vec::new())));
    }
    let reports = VisitReportRepo::search_by_name(&state.pool, term).await?;
    Ok(Json(DataResponse::new(reports)))
}

/// PUT /api/v1/visit-reports/{id}
pub async fn update_visit_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = VisitReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("VisitReport", id))?;
    let mut form = FormData::read(multipart).await?;

    let mut input = UpdateVisitReport {
        company_name: form.text("company_name"),
        company_address: form.text("company_address"),
        pin_code: form.text("pin_code"),
        industry_segment: form.text("industry_segment"),
        customer_name: form.text("customer_name"),
        customer_mobile: form.text("customer_mobile"),
        customer_email: form.text("customer_email"),
        department: form.text("department"),
        notes: form.text("notes"),
        attachment: None,
        created_by: form.text("created_by"),
    };
    input.attachment = store_attachment(&state, &mut form).await?;

    let report = VisitReportRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("VisitReport", id))?;

    if let (Some(old), Some(_)) = (&existing.attachment, &input.attachment) {
        state.uploads.remove(old).await;
    }

    tracing::info!(visit_report_id = id, "Visit report updated");

    Ok(Json(DataResponse::with_message(report, "Visit report updated")))
}

/// DELETE /api/v1/visit-reports/{id}
pub async fn delete_visit_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = VisitReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("VisitReport", id))?;

    VisitReportRepo::delete(&state.pool, id).await?;
    if let Some(path) = &existing.attachment {
        state.uploads.remove(path).await;
    }

    tracing::info!(visit_report_id = id, "Visit report deleted");

    Ok(Json(MessageResponse::new("Visit report deleted")))
}
