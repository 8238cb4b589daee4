pub mod manager;
pub mod routes;
pub mod token_store;

pub use manager::{LoginOutcome, SessionManager, SessionState, SessionStatus};
pub use routes::{
    dashboard_route_for, ADMIN_DASHBOARD_ROUTE, LOGIN_ROUTE, OWNER_DASHBOARD_ROUTE,
    UNAUTHORIZED_ROUTE, USER_DASHBOARD_ROUTE,
};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
