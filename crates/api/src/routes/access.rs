//! Route definitions for user types, modules, permissions and access control.
//!
//! ```text
//! USER TYPES:
//! GET    /                              list_user_types
//! POST   /                              create_user_type
//! GET    /by-name/{name}/modules        modules_for_user_type_name
//! GET    /{id}                          get_user_type
//! PUT    /{id}                          update_user_type
//! DELETE /{id}                          delete_user_type
//!
//! MODULES:
//! GET    /                              list_modules
//! POST   /                              create_module
//! PUT    /{id}                          update_module
//! DELETE /{id}                          delete_module
//!
//! PERMISSIONS:
//! GET    /                              list_permissions
//! GET    /user-type/{id}                permissions_for_user_type
//! POST   /upsert                        upsert_permissions
//!
//! ACCESS CONTROL:
//! GET    /                              list_access_controls
//! POST   /                              set_access_control
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// User type routes, mounted at `/user-types`.
pub fn user_type_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(access::list_user_types).post(access::create_user_type),
        )
        .route(
            "/by-name/{name}/modules",
            get(access::modules_for_user_type_name),
        )
        .route(
            "/{id}",
            get(access::get_user_type)
                .put(access::update_user_type)
                .delete(access::delete_user_type),
        )
}

/// Module routes, mounted at `/modules`.
pub fn module_router() -> Router<AppState> {
    Router::new()
        .route("/", get(access::list_modules).post(access::create_module))
        .route(
            "/{id}",
            put(access::update_module).delete(access::delete_module),
        )
}

/// Permission routes, mounted at `/permissions`.
pub fn permission_router() -> Router<AppState> {
    Router::new()
        .route("/", get(access::list_permissions))
        .route("/user-type/{id}", get(access::permissions_for_user_type))
        .route("/upsert", post(access::upsert_permissions))
}

/// Access-control routes, mounted at `/access-control`.
pub fn access_control_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(access::list_access_controls).post(access::set_access_control),
    )
}
