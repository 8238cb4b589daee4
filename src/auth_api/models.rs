//! Request and response models for the Authentication Service.

use serde::{Deserialize, Serialize};

use crate::user::{User, UserRole};

/// Email/password pair submitted at login. Shape validation (non-empty
/// fields, email format) is the caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload for account creation.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Access/refresh token pair. Always stored and cleared together, the two
/// halves are never observable in a mixed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Successful login/registration response: the account plus a fresh token
/// pair.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthGrant {
    pub user: User,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Partial profile update; absent fields are left untouched by the service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
