//! Capability gates.
//!
//! A gate is a pure function of the current session snapshot: no IO, no
//! clocks, no storage. The routing layer evaluates one (or several) around a
//! protected view and acts on the returned decision.

use tradegate_core::Role;

use crate::routes;
use crate::store::SessionSnapshot;

/// Outcome of a gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the navigation proceed.
    Allow,
    /// Deny and send the caller elsewhere. `return_to` carries the original
    /// destination when the gate supports post-login return.
    Redirect {
        target: &'static str,
        return_to: Option<String>,
    },
}

/// Access predicate guarding a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Any authenticated session; denial redirects to admin login with the
    /// original destination captured.
    Authenticated,
    /// Authenticated admin; denial redirects to admin login with capture.
    Admin,
    /// Authenticated supplier; denial redirects to the site root, no capture.
    Supplier,
    /// Authenticated client; denial redirects to the site root, no capture.
    Client,
    /// Unauthenticated callers only; an authenticated caller is sent to their
    /// role's landing page.
    Guest,
}

impl Gate {
    /// Evaluate this gate against a session snapshot.
    ///
    /// `requested_path` is the destination the caller was headed to; gates
    /// that support post-login return capture it in the redirect.
    pub fn evaluate(&self, session: &SessionSnapshot, requested_path: &str) -> GateDecision {
        match self {
            Gate::Authenticated => {
                if session.authenticated {
                    GateDecision::Allow
                } else {
                    redirect_to_login(requested_path)
                }
            }
            Gate::Admin => {
                if session.authenticated && session.is_admin() {
                    GateDecision::Allow
                } else {
                    redirect_to_login(requested_path)
                }
            }
            Gate::Supplier => {
                if session.is_supplier() {
                    GateDecision::Allow
                } else {
                    redirect_to_root()
                }
            }
            Gate::Client => {
                if session.is_client() {
                    GateDecision::Allow
                } else {
                    redirect_to_root()
                }
            }
            Gate::Guest => {
                if session.authenticated {
                    GateDecision::Redirect {
                        target: routes::landing_for(session.role.as_ref()),
                        return_to: None,
                    }
                } else {
                    GateDecision::Allow
                }
            }
        }
    }
}

fn redirect_to_login(requested_path: &str) -> GateDecision {
    GateDecision::Redirect {
        target: routes::ADMIN_LOGIN,
        return_to: Some(requested_path.to_string()),
    }
}

fn redirect_to_root() -> GateDecision {
    GateDecision::Redirect {
        target: routes::SITE_ROOT,
        return_to: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guest() -> SessionSnapshot {
        SessionSnapshot {
            authenticated: false,
            role: None,
        }
    }

    fn session_as(role: Role) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: true,
            role: Some(role),
        }
    }

    #[test]
    fn authenticated_gate_allows_any_role() {
        for role in [Role::Admin, Role::Supplier, Role::Client, Role::from("x")] {
            assert_eq!(
                Gate::Authenticated.evaluate(&session_as(role), "/orders"),
                GateDecision::Allow
            );
        }
    }

    #[test]
    fn authenticated_gate_captures_destination_on_denial() {
        assert_eq!(
            Gate::Authenticated.evaluate(&guest(), "/orders/42"),
            GateDecision::Redirect {
                target: routes::ADMIN_LOGIN,
                return_to: Some("/orders/42".to_string()),
            }
        );
    }

    #[test]
    fn admin_gate_allows_admins_only() {
        assert_eq!(
            Gate::Admin.evaluate(&session_as(Role::Admin), "/admin/users"),
            GateDecision::Allow
        );

        for snapshot in [
            guest(),
            session_as(Role::Supplier),
            session_as(Role::Client),
            session_as(Role::from("auditor")),
        ] {
            assert_eq!(
                Gate::Admin.evaluate(&snapshot, "/admin/users"),
                GateDecision::Redirect {
                    target: routes::ADMIN_LOGIN,
                    return_to: Some("/admin/users".to_string()),
                }
            );
        }
    }

    #[test]
    fn role_gates_redirect_to_root_without_capture() {
        assert_eq!(
            Gate::Supplier.evaluate(&session_as(Role::Supplier), "/supplier/products"),
            GateDecision::Allow
        );
        assert_eq!(
            Gate::Supplier.evaluate(&session_as(Role::Client), "/supplier/products"),
            GateDecision::Redirect {
                target: routes::SITE_ROOT,
                return_to: None,
            }
        );

        assert_eq!(
            Gate::Client.evaluate(&session_as(Role::Client), "/client/orders"),
            GateDecision::Allow
        );
        assert_eq!(
            Gate::Client.evaluate(&guest(), "/client/orders"),
            GateDecision::Redirect {
                target: routes::SITE_ROOT,
                return_to: None,
            }
        );
    }

    #[test]
    fn guest_gate_allows_only_unauthenticated() {
        assert_eq!(Gate::Guest.evaluate(&guest(), "/login"), GateDecision::Allow);

        // Denies for every role value, including an unrecognized one.
        let cases = [
            (Role::Admin, routes::ADMIN_DASHBOARD),
            (Role::Client, routes::CLIENT_DASHBOARD),
            (Role::Supplier, routes::SUPPLIER_DASHBOARD),
            (Role::from("auditor"), routes::SITE_ROOT),
        ];
        for (role, landing) in cases {
            assert_eq!(
                Gate::Guest.evaluate(&session_as(role), "/login"),
                GateDecision::Redirect {
                    target: landing,
                    return_to: None,
                }
            );
        }
    }
}
