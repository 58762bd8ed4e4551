//! Handlers for employee records and their uploaded documents.
//!
//! Create and update take `multipart/form-data`; documents are stored as
//! `{kind}_{email}_{file}` below the upload root.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use bizdesk_core::uploads::{employee_document_name, EmployeeDocument};
use bizdesk_db::models::employee::{CreateEmployee, Employee, UpdateEmployee};
use bizdesk_db::models::user::LoginRequest;
use bizdesk_db::repositories::EmployeeRepo;

use crate::auth::password::{hash_for_storage, password_matches};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;
use crate::handlers::form::FormData;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;
use crate::uploads::UploadStore;

/// Documents stored for one request, keyed by slot.
#[derive(Debug, Default)]
struct StoredDocuments {
    photo: Option<String>,
    pan_attachment: Option<String>,
    aadhar_attachment: Option<String>,
}

impl StoredDocuments {
    fn slot(&mut self, doc: EmployeeDocument) -> &mut Option<String> {
        match doc {
            EmployeeDocument::Photo => &mut self.photo,
            EmployeeDocument::PanAttachment => &mut self.pan_attachment,
            EmployeeDocument::AadharAttachment => &mut self.aadhar_attachment,
        }
    }

    fn paths(&self) -> impl Iterator<Item = &str> {
        [&self.photo, &self.pan_attachment, &self.aadhar_attachment]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Store every accepted document in the form. Files with other extensions
/// are ignored.
async fn store_documents(
    uploads: &UploadStore,
    form: &mut FormData,
    email: &str,
) -> AppResult<StoredDocuments> {
    let mut stored = StoredDocuments::default();
    for doc in EmployeeDocument::ALL {
        let Some(file) = form.take_file(doc.field_name()) else {
            continue;
        };
        let Some(name) = employee_document_name(doc, email, &file.file_name) else {
            tracing::debug!(field = doc.field_name(), file = %file.file_name, "Ignoring unsupported document");
            continue;
        };
        let path = uploads
            .save(None, &name, &file.bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;
        *stored.slot(doc) = Some(path);
    }
    Ok(stored)
}

async fn discard(uploads: &UploadStore, stored: &StoredDocuments) {
    for path in stored.paths() {
        uploads.remove(path).await;
    }
}

/// POST /api/v1/employees
pub async fn create_employee(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::read(multipart).await?;

    let email = normalize_email(&form.required("email")?);
    let input = CreateEmployee {
        name: form.required("name")?,
        dob: form
            .date("dob")?
            .ok_or_else(|| AppError::BadRequest("dob is required".into()))?,
        gender: form.required("gender")?,
        email: email.clone(),
        address: form.required("address")?,
        department: form.text("department"),
        designation: form.text("designation"),
        doj: form.date("doj")?,
        emp_type: form.text("emp_type"),
        user_type: form.text("user_type"),
        mobile: form.required("mobile")?,
        alt_contact: form.text("alt_contact"),
        pan: form.text("pan"),
        aadhar: form.text("aadhar"),
        password_hash: hash_for_storage(&form.required("password")?)?,
        photo: None,
        pan_attachment: None,
        aadhar_attachment: None,
        esi_pf_status: form.text("esi_pf_status"),
        created_by: form.text("created_by"),
    };

    if EmployeeRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An employee with this email already exists".into(),
        )));
    }

    let stored = store_documents(&state.uploads, &mut form, &email).await?;
    let input = CreateEmployee {
        photo: stored.photo.clone(),
        pan_attachment: stored.pan_attachment.clone(),
        aadhar_attachment: stored.aadhar_attachment.clone(),
        ..input
    };

    let employee = match EmployeeRepo::create(&state.pool, &input).await {
        Ok(employee) => employee,
        Err(e) => {
            discard(&state.uploads, &stored).await;
            return Err(e.into());
        }
    };

    tracing::info!(employee_id = employee.id, "Employee created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(employee, "Employee created")),
    ))
}

/// GET /api/v1/employees
pub async fn list_employees(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(employees)))
}

/// GET /api/v1/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(DataResponse::new(employee)))
}

/// GET /api/v1/employees/esi-pf/{status}
pub async fn list_by_esi_pf_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list_by_esi_pf_status(&state.pool, status.trim()).await?;
    Ok(Json(DataResponse::new(employees)))
}

/// PUT /api/v1/employees/{id}
///
/// Provided fields override; a new document replaces and deletes the
/// previous file in that slot.
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let existing = find_employee(&state, id).await?;
    let mut form = FormData::read(multipart).await?;

    let email = form.text("email").map(|e| normalize_email(&e));
    let password_hash = match form.text("password") {
        Some(password) => Some(hash_for_storage(&password)?),
        None => None,
    };
    let owner = email.clone().unwrap_or_else(|| existing.email.clone());

    let mut input = UpdateEmployee {
        name: form.text("name"),
        dob: form.date("dob")?,
        gender: form.text("gender"),
        email,
        address: form.text("address"),
        department: form.text("department"),
        designation: form.text("designation"),
        doj: form.date("doj")?,
        emp_type: form.text("emp_type"),
        user_type: form.text("user_type"),
        mobile: form.text("mobile"),
        alt_contact: form.text("alt_contact"),
        pan: form.text("pan"),
        aadhar: form.text("aadhar"),
        password_hash,
        esi_pf_status: form.text("esi_pf_status"),
        ..Default::default()
    };

    let stored = store_documents(&state.uploads, &mut form, &owner).await?;
    input.photo = stored.photo.clone();
    input.pan_attachment = stored.pan_attachment.clone();
    input.aadhar_attachment = stored.aadhar_attachment.clone();

    let employee = match EmployeeRepo::update(&state.pool, id, &input).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            discard(&state.uploads, &stored).await;
            return Err(AppError::not_found("Employee", id));
        }
        Err(e) => {
            discard(&state.uploads, &stored).await;
            return Err(e.into());
        }
    };

    let replaced = [
        (&existing.photo, &stored.photo),
        (&existing.pan_attachment, &stored.pan_attachment),
        (&existing.aadhar_attachment, &stored.aadhar_attachment),
    ];
    for (old, new) in replaced {
        if let (Some(old), Some(new)) = (old, new) {
            if old != new {
                state.uploads.remove(old).await;
            }
        }
    }

    tracing::info!(employee_id = id, "Employee updated");

    Ok(Json(DataResponse::with_message(employee, "Employee updated")))
}

/// DELETE /api/v1/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = find_employee(&state, id).await?;

    if !EmployeeRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Employee", id));
    }
    for path in employee.document_paths() {
        state.uploads.remove(path).await;
    }

    tracing::info!(employee_id = id, "Employee deleted");

    Ok(Json(MessageResponse::new("Employee deleted")))
}

/// POST /api/v1/employees/login
pub async fn employee_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&input.email);
    if email.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let unauthorized =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let employee = EmployeeRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(unauthorized)?;
    if !password_matches(&input.password, &employee.password_hash) {
        return Err(unauthorized());
    }

    tracing::info!(employee_id = employee.id, "Employee logged in");

    Ok(Json(DataResponse::with_message(employee, "Login successful")))
}

async fn find_employee(state: &AppState, id: DbId) -> AppResult<Employee> {
    EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Employee", id))
}
