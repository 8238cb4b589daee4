use async_trait::async_trait;

use super::error::AuthError;
use super::models::{AuthGrant, Credentials, ProfilePatch, Registration, TokenPair};
use crate::user::User;

/// Logical calls the core makes against the Authentication Service.
///
/// All methods suspend on network I/O; none of them touch session state.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError>;

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError>;

    /// Exchange a refresh token for a rotated token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Resolve the account behind an access token.
    async fn current_user(&self, access_token: &str) -> Result<User, AuthError>;

    async fn update_profile(
        &self,
        access_token: &str,
        patch: &ProfilePatch,
    ) -> Result<User, AuthError>;
}
