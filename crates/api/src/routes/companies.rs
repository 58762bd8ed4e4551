//! Route definitions for customer companies and field visit reports.
//!
//! ```text
//! COMPANIES:
//! GET    /                              list_companies
//! POST   /                              create_company
//! GET    /by-mobile/{mobile}            get_company_by_mobile
//! GET    /by-name/{name}                get_company_by_name
//! GET    /{id}                          get_company
//! PUT    /{id}                          update_company
//! DELETE /{id}                          delete_company
//!
//! VISIT REPORTS:
//! GET    /                              list_visit_reports
//! POST   /                              create_visit_report (multipart)
//! GET    /by-user/{username}            list_by_user
//! GET    /search                        search_by_date
//! GET    /search-name                   search_by_name
//! GET    /{id}                          get_visit_report
//! PUT    /{id}                          update_visit_report (multipart)
//! DELETE /{id}                          delete_visit_report
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{companies, visit_reports};
use crate::state::AppState;

/// Company routes, mounted at `/companies`.
pub fn company_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route("/by-mobile/{mobile}", get(companies::get_company_by_mobile))
        .route("/by-name/{name}", get(companies::get_company_by_name))
        .route(
            "/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
}

/// Visit report routes, mounted at `/visit-reports`.
pub fn visit_report_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(visit_reports::list_visit_reports).post(visit_reports::create_visit_report),
        )
        .route("/by-user/{username}", get(visit_reports::list_by_user))
        .route("/search", get(visit_reports::search_by_date))
        .route("/search-name", get(visit_reports::search_by_name))
        .route(
            "/{id}",
            get(visit_reports::get_visit_report)
                .put(visit_reports::update_visit_report)
                .delete(visit_reports::delete_visit_report),
        )
}
