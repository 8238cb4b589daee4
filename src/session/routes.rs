//! Role-driven routing table.
//!
//! Every redirect and menu decision consults this single table instead of
//! re-deriving routes from the role ad hoc.

use crate::user::UserRole;

pub const LOGIN_ROUTE: &str = "/login";
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";
pub const USER_DASHBOARD_ROUTE: &str = "/dashboard";
pub const OWNER_DASHBOARD_ROUTE: &str = "/owner/dashboard";
pub const ADMIN_DASHBOARD_ROUTE: &str = "/admin/dashboard";

const ROLE_ROUTES: &[(UserRole, &str)] = &[
    (UserRole::Admin, ADMIN_DASHBOARD_ROUTE),
    (UserRole::Owner, OWNER_DASHBOARD_ROUTE),
    (UserRole::User, USER_DASHBOARD_ROUTE),
];

/// Dashboard route for a role; the entry route for anything unrecognized.
pub fn dashboard_route_for(role: UserRole) -> &'static str {
    ROLE_ROUTES
        .iter()
        .find(|(candidate, _)| *candidate == role)
        .map(|(_, route)| *route)
        .unwrap_or(LOGIN_ROUTE)
}
