//! Route definitions for employees.
//!
//! ```text
//! GET    /                              list_employees
//! POST   /                              create_employee (multipart)
//! POST   /login                         employee_login
//! GET    /esi-pf/{status}               list_by_esi_pf_status
//! GET    /{id}                          get_employee
//! PUT    /{id}                          update_employee (multipart)
//! DELETE /{id}                          delete_employee
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Employee routes, mounted at `/employees`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/login", post(employees::employee_login))
        .route("/esi-pf/{status}", get(employees::list_by_esi_pf_status))
        .route(
            "/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
}
