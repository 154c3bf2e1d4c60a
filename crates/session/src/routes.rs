//! Navigation targets used by gate redirects.
//!
//! The session core never navigates; gates hand one of these paths back to
//! the routing layer as part of a [`crate::GateDecision`].

use tradegate_core::Role;

pub const SITE_ROOT: &str = "/";
pub const ADMIN_LOGIN: &str = "/admin/login";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const SUPPLIER_DASHBOARD: &str = "/supplier/dashboard";
pub const CLIENT_DASHBOARD: &str = "/client/dashboard";

/// Fixed landing page per role, used when an authenticated user hits a
/// guest-only view. Unrecognized roles land on the site root.
pub fn landing_for(role: Option<&Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_DASHBOARD,
        Some(Role::Client) => CLIENT_DASHBOARD,
        Some(Role::Supplier) => SUPPLIER_DASHBOARD,
        Some(Role::Unrecognized(_)) | None => SITE_ROOT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_map_is_fixed() {
        assert_eq!(landing_for(Some(&Role::Admin)), ADMIN_DASHBOARD);
        assert_eq!(landing_for(Some(&Role::Client)), CLIENT_DASHBOARD);
        assert_eq!(landing_for(Some(&Role::Supplier)), SUPPLIER_DASHBOARD);
        assert_eq!(landing_for(Some(&Role::from("auditor"))), SITE_ROOT);
        assert_eq!(landing_for(None), SITE_ROOT);
    }
}
