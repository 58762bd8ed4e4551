//! Handlers for daily check-in/check-out and monthly attendance summaries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::attendance::{
    duration_label, STATUS_CHECKED_IN, STATUS_CHECKED_OUT, UNKNOWN_DURATION,
};
use bizdesk_core::calendar::MonthPeriod;
use bizdesk_core::error::CoreError;
use bizdesk_db::models::attendance::{
    AttendanceResponse, CheckIn, CheckOut, CheckOutUpdate, NewCheckIn, SummaryInput,
};
use bizdesk_db::repositories::AttendanceRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;
use crate::query::PeriodParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/v1/attendance/check-in
pub async fn check_in(
    State(state): State<AppState>,
    Json(input): Json<CheckIn>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(username), Some(date)) = (
        non_blank(input.email.as_deref()).map(normalize_email),
        non_blank(input.username.as_deref()),
        input.date,
    ) else {
        return Err(AppError::BadRequest(
            "email, username and date are required".into(),
        ));
    };

    if AttendanceRepo::find_for_day(&state.pool, &email, date)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Already checked in for this date".into(),
        )));
    }

    let row = AttendanceRepo::check_in(
        &state.pool,
        &NewCheckIn {
            email: &email,
            username,
            date,
            check_in: non_blank(input.check_in.as_deref()),
            status: STATUS_CHECKED_IN,
            device: input.device.as_ref(),
            location: input.location.as_ref(),
        },
    )
    .await?;

    tracing::info!(attendance_id = row.id, %date, "Checked in");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            AttendanceResponse::from(row),
            "Check-in recorded",
        )),
    ))
}

/// PUT /api/v1/attendance/check-out
///
/// Computes the worked duration from the stored check-in.
pub async fn check_out(
    State(state): State<AppState>,
    Json(input): Json<CheckOut>,
) -> AppResult<impl IntoResponse> {
    let (Some(email), Some(date)) = (
        non_blank(input.email.as_deref()).map(normalize_email),
        input.date,
    ) else {
        return Err(AppError::BadRequest("email and date are required".into()));
    };

    let record = AttendanceRepo::find_for_day(&state.pool, &email, date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No attendance record for {email} on {date}")))?;
    let Some(checked_in_at) = non_blank(record.check_in.as_deref()) else {
        return Err(AppError::NotFound(format!(
            "No check-in recorded for {email} on {date}"
        )));
    };

    let check_out_at = non_blank(input.check_out.as_deref());
    let duration = match check_out_at {
        Some(out) => duration_label(checked_in_at, out)?,
        None => UNKNOWN_DURATION.to_string(),
    };

    let row = AttendanceRepo::check_out(
        &state.pool,
        record.id,
        &CheckOutUpdate {
            check_out: check_out_at,
            status: STATUS_CHECKED_OUT,
            duration: &duration,
            device_out: input.device_out.as_ref(),
            location_out: input.location_out.as_ref(),
        },
    )
    .await?
    .ok_or(AppError::not_found("Attendance", record.id))?;

    tracing::info!(attendance_id = row.id, %duration, "Checked out");

    Ok(Json(DataResponse::with_message(
        AttendanceResponse::from(row),
        "Check-out recorded",
    )))
}

/// GET /api/v1/attendance
pub async fn list_attendance(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = AttendanceRepo::list(&state.pool).await?;
    let data: Vec<AttendanceResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse::new(data)))
}

/// GET /api/v1/attendance/by-email/{email}
pub async fn list_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows = AttendanceRepo::list_by_email(&state.pool, &normalize_email(&email)).await?;
    let data: Vec<AttendanceResponse> = rows.into_iter().map(Into::into).collect();
    Ok(Json(DataResponse::new(data)))
}

/// POST /api/v1/attendance/summary
///
/// Upserts on `(email, month, year)`; incomplete entries are skipped.
pub async fn save_summaries(
    State(state): State<AppState>,
    Json(mut entries): Json<Vec<SummaryInput>>,
) -> AppResult<impl IntoResponse> {
    if entries.is_empty() {
        return Err(AppError::BadRequest("No summary entries provided".into()));
    }
    for entry in &mut entries {
        entry.email = entry.email.as_deref().map(normalize_email);
        if let Some(month) = entry.month {
            if !(1..=12).contains(&month) {
                return Err(AppError::BadRequest(format!(
                    "Month must be between 1 and 12, got {month}"
                )));
            }
        }
    }

    let saved = AttendanceRepo::upsert_summaries(&state.pool, &entries).await?;

    tracing::info!(
        received = entries.len(),
        saved = saved.len(),
        "Attendance summaries saved",
    );

    Ok(Json(DataResponse::with_message(
        saved,
        "Attendance summary saved",
    )))
}

/// GET /api/v1/attendance/summary?month&year
pub async fn list_summaries(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<impl IntoResponse> {
    let period = MonthPeriod::new(params.month, params.year)?;
    let rows = AttendanceRepo::list_summaries(&state.pool, period.month, period.year).await?;
    Ok(Json(DataResponse::new(rows)))
}
