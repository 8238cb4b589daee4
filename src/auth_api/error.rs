use thiserror::Error;

/// Failure categories surfaced by authentication calls.
///
/// `Clone` matters here: the single-flight refresh hands the same outcome to
/// every attached caller, errors included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Login or registration rejected by the Authentication Service.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// An authenticated call was rejected because the access token is stale.
    #[error("access token expired or rejected")]
    TokenExpired,

    /// The refresh itself failed; the session cannot be recovered.
    #[error("session refresh failed: {0}")]
    RefreshFailed(String),

    #[error("too many attempts, try again later")]
    RateLimited,

    #[error("account is locked")]
    AccountLocked,

    /// Transport-level failure, no automatic retry beyond the documented
    /// bounded retry for profile updates.
    #[error("network error: {0}")]
    Network(String),
}

impl AuthError {
    /// True for errors that mean the held credentials are no longer valid.
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExpired | AuthError::RefreshFailed(_) | AuthError::InvalidCredentials(_)
        )
    }
}
