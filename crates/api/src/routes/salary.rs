//! Route definitions for the payroll sheets.
//!
//! Each variant (`esi-pf`, `no-esi-pf`, `casual`) is mounted with:
//!
//! ```text
//! GET    /?month&year                   list_month
//! POST   /save                          save_sheet
//! GET    /all                           list_all
//! ```

use axum::routing::{get, post};
use axum::Router;
use bizdesk_db::models::salary::{CasualSalary, EsiPfSalary, NoEsiPfSalary, SalarySheet};

use crate::handlers::salary;
use crate::state::AppState;

fn sheet_router<S: SalarySheet>() -> Router<AppState> {
    Router::new()
        .route("/", get(salary::list_month::<S>))
        .route("/save", post(salary::save_sheet::<S>))
        .route("/all", get(salary::list_all::<S>))
}

/// Salary routes, mounted at `/salary`.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/esi-pf", sheet_router::<EsiPfSalary>())
        .nest("/no-esi-pf", sheet_router::<NoEsiPfSalary>())
        .nest("/casual", sheet_router::<CasualSalary>())
}
