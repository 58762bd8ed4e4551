//! Module visibility for user types.
//!
//! Visibility is a UI gating aid, not server-side authorization.

/// Resolve the module names a user type may see.
///
/// An unknown user type sees every module. A known user type sees only the
/// modules it has been granted, in the order given.
pub fn visible_modules(
    user_type_known: bool,
    granted: Vec<String>,
    all_modules: Vec<String>,
) -> Vec<String> {
    if user_type_known {
        granted
    } else {
        all_modules
    }
}

/// Interpret the legacy integer access flag (`1` grants access).
pub fn access_flag(value: i64) -> bool {
    value == 1
}
