//! User data models

use serde::{Deserialize, Serialize};

use super::permissions::UserRole;

/// The authenticated account as returned by the Authentication Service.
///
/// Replaced wholesale on login/registration/bootstrap, or by the result of a
/// profile update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

/// Optional profile fields carried alongside the core account data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
