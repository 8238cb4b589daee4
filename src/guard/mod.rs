//! Route authorization.
//!
//! Thin composition over the session manager: given a requested path and the
//! roles a view declares acceptable, decide whether navigation proceeds. The
//! check is pure and synchronous over current session state; it never
//! triggers a token refresh (the data-fetching layer owns that).

use tracing::debug;

use crate::session::SessionManager;
use crate::user::UserRole;

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Not authenticated; carries the originally requested path so the caller
    /// can return there after login.
    RedirectToLogin { return_to: String },
    /// Authenticated but the role is not acceptable for this view.
    RedirectToUnauthorized,
}

pub struct RouteGuard {
    session: SessionManager,
}

impl RouteGuard {
    pub fn new(session: SessionManager) -> Self {
        Self { session }
    }

    /// Authorize navigation to `requested_path` for a view accepting
    /// `required_roles`. An empty role set admits any authenticated session.
    pub fn authorize(&self, requested_path: &str, required_roles: &[UserRole]) -> GuardDecision {
        if !self.session.is_authenticated() {
            debug!(path = requested_path, "unauthenticated, redirecting to login");
            return GuardDecision::RedirectToLogin {
                return_to: requested_path.to_string(),
            };
        }

        if required_roles.is_empty() || self.session.has_any_role(required_roles) {
            GuardDecision::Allow
        } else {
            debug!(path = requested_path, "role not acceptable for view");
            GuardDecision::RedirectToUnauthorized
        }
    }
}
