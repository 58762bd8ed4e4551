//! Handlers for customer companies.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::types::DbId;
use bizdesk_db::models::company::CompanyInput;
use bizdesk_db::repositories::CompanyRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn trimmed(mut input: CompanyInput) -> AppResult<CompanyInput> {
    for field in [
        &mut input.company_name,
        &mut input.company_address,
        &mut input.pin_code,
        &mut input.industry_segment,
        &mut input.customer_name,
        &mut input.customer_mobile,
        &mut input.customer_email,
        &mut input.department,
        &mut input.personal_mobile,
        &mut input.personal_email,
    ] {
        *field = field.trim().to_string();
    }
    input.validate()?;
    Ok(input)
}

/// POST /api/v1/companies
pub async fn create_company(
    State(state): State<AppState>,
    Json(input): Json<CompanyInput>,
) -> AppResult<impl IntoResponse> {
    let input = trimmed(input)?;
    let company = CompanyRepo::create(&state.pool, &input).await?;

    tracing::info!(company_id = company.id, "Company created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(company, "Company created")),
    ))
}

/// GET /api/v1/companies
pub async fn list_companies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let companies = CompanyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(companies)))
}

/// GET /api/v1/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Company", id))?;
    Ok(Json(DataResponse::new(company)))
}

/// GET /api/v1/companies/by-mobile/{mobile}
pub async fn get_company_by_mobile(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mobile = mobile.trim();
    let company = CompanyRepo::find_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company with mobile {mobile}")))?;
    Ok(Json(DataResponse::new(company)))
}

/// GET /api/v1/companies/by-name/{name}
///
/// First company whose name contains `name`, ignoring case.
pub async fn get_company_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let name = name.trim();
    let company = CompanyRepo::find_by_name(&state.pool, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company matching '{name}'")))?;
    Ok(Json(DataResponse::new(company)))
}

/// PUT /api/v1/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompanyInput>,
) -> AppResult<impl IntoResponse> {
    let input = trimmed(input)?;
    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Company", id))?;

    tracing::info!(company_id = id, "Company updated");

    Ok(Json(DataResponse::with_message(company, "Company updated")))
}

/// DELETE /api/v1/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CompanyRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Company", id));
    }

    tracing::info!(company_id = id, "Company deleted");

    Ok(Json(MessageResponse::new("Company deleted")))
}
