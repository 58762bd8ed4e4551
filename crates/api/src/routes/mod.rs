pub mod access;
pub mod attendance;
pub mod auth;
pub mod companies;
pub mod employees;
pub mod health;
pub mod lookups;
pub mod quotations;
pub mod salary;
pub mod stock;
pub mod tasks;

use axum::Router;
use bizdesk_db::models::lookup::{Department, Designation, IndustrialSegment};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register, /auth/login, /auth/profile       user accounts
///
/// /user-types                                      list, create
/// /user-types/{id}                                 get, update, delete
/// /user-types/by-name/{name}/modules               visible modules
/// /modules                                         list, create
/// /modules/{id}                                    update, delete
/// /permissions                                     list
/// /permissions/user-type/{id}                      per user type
/// /permissions/upsert                              bulk upsert (POST)
/// /access-control                                  list, replace (POST)
///
/// /departments, /designations,
/// /industrial-segments                             list, create
/// /.../{id}                                        get, update, delete
///
/// /employees                                       list, create (multipart)
/// /employees/{id}                                  get, update (multipart), delete
/// /employees/esi-pf/{status}                       filter
/// /employees/login                                 employee login (POST)
///
/// /companies                                       list, create
/// /companies/{id}                                  get, update, delete
/// /companies/by-mobile/{mobile}                    exact mobile lookup
/// /companies/by-name/{name}                        name lookup
/// /visit-reports                                   list, create (multipart)
/// /visit-reports/{id}                              get, update (multipart), delete
/// /visit-reports/by-user/{username}                per creator
/// /visit-reports/search                            date range
/// /visit-reports/search-name                       free-text
///
/// /attendance                                      list
/// /attendance/check-in                             check in (POST)
/// /attendance/check-out                            check out (PUT)
/// /attendance/by-email/{email}                     per employee
/// /attendance/summary                              monthly summaries (GET, POST)
/// /holidays                                        list, replace month (PUT)
/// /holidays/{id}                                   delete
/// /advances                                        list, create
/// /advances/{id}                                   get, update, delete
///
/// /salary/{esi-pf|no-esi-pf|casual}                list month
/// /salary/{variant}/save                           replace month (POST)
/// /salary/{variant}/all                            every month
///
/// /tasks                                           list (filtered), create
/// /tasks/{id}                                      get, update, delete
///
/// /stock                                           list
/// /stock/bulk-save                                 insert rows (POST)
/// /stock/bulk-update                               price update by brand code (PUT)
/// /stock/{id}                                      get, delete
/// /stock-sold                                      list, create
/// /grn                                             list, create
/// /grn/batch                                       shared-header batch (POST)
/// /mrp                                             list
/// /mrp/import                                      CSV import (multipart POST)
/// /mrp/unmatched                                   stock brands without a price
/// /mrp/{id}                                        update, delete
///
/// /quotations                                      list (paginated), create
/// /quotations/statistics                           aggregate statistics
/// /quotations/search                               free-text search
/// /quotations/recent                               most recent
/// /quotations/{id}                                 get, update, delete
/// /quotations/{id}/status                          status change (PATCH)
/// /quotations/{id}/items/{item_id}/status          item status (PATCH)
/// /quotations/{id}/items/bulk-status               bulk item status (PATCH)
/// /quotations/{id}/item-statistics                 item status counts
/// /quotations/{id}/export                          full document
/// /quotations/{id}/requote                         create re-quote (POST)
/// /quotations/{id}/requotes                        direct re-quotes
///
/// /uploads/{path}                                  stored files (static)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        // Access control and UI permissions.
        .nest("/user-types", access::user_type_router())
        .nest("/modules", access::module_router())
        .nest("/permissions", access::permission_router())
        .nest("/access-control", access::access_control_router())
        // Organisation lookups.
        .nest("/departments", lookups::router::<Department>())
        .nest("/designations", lookups::router::<Designation>())
        .nest("/industrial-segments", lookups::router::<IndustrialSegment>())
        // HR.
        .nest("/employees", employees::router())
        .nest("/attendance", attendance::attendance_router())
        .nest("/holidays", attendance::holiday_router())
        .nest("/advances", attendance::advance_router())
        .nest("/salary", salary::router())
        // Sales.
        .nest("/companies", companies::company_router())
        .nest("/visit-reports", companies::visit_report_router())
        .nest("/quotations", quotations::router())
        .nest("/tasks", tasks::router())
        // Inventory.
        .nest("/stock", stock::stock_router())
        .nest("/stock-sold", stock::stock_sold_router())
        .nest("/grn", stock::grn_router())
        .nest("/mrp", stock::mrp_router())
}
