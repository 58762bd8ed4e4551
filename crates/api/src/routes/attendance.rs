//! Route definitions for attendance, holidays and salary advances.
//!
//! ```text
//! ATTENDANCE:
//! GET    /                              list_attendance
//! POST   /check-in                      check_in
//! PUT    /check-out                     check_out
//! GET    /by-email/{email}              list_by_email
//! GET    /summary                       list_summaries
//! POST   /summary                       save_summaries
//!
//! HOLIDAYS:
//! GET    /                              list_holidays
//! PUT    /                              save_holidays
//! DELETE /{id}                          delete_holiday
//!
//! ADVANCES:
//! GET    /                              list_advances
//! POST   /                              create_advance
//! GET    /{id}                          get_advance
//! PUT    /{id}                          update_advance
//! DELETE /{id}                          delete_advance
//! ```

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{advances, attendance, holidays};
use crate::state::AppState;

/// Attendance routes, mounted at `/attendance`.
pub fn attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(attendance::list_attendance))
        .route("/check-in", post(attendance::check_in))
        .route("/check-out", put(attendance::check_out))
        .route("/by-email/{email}", get(attendance::list_by_email))
        .route(
            "/summary",
            get(attendance::list_summaries).post(attendance::save_summaries),
        )
}

/// Holiday routes, mounted at `/holidays`.
pub fn holiday_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(holidays::list_holidays).put(holidays::save_holidays),
        )
        .route("/{id}", delete(holidays::delete_holiday))
}

/// Advance routes, mounted at `/advances`.
pub fn advance_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(advances::list_advances).post(advances::create_advance),
        )
        .route(
            "/{id}",
            get(advances::get_advance)
                .put(advances::update_advance)
                .delete(advances::delete_advance),
        )
}
