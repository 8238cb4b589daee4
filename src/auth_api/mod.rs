//! Remote Authentication Service collaborator.
//!
//! The session manager talks to the Authentication Service exclusively
//! through the [`AuthApi`] trait; [`HttpAuthApi`] is the production JSON/HTTP
//! implementation. The wire format is owned by the service, this module only
//! maps it onto the crate's models and error taxonomy.

mod api;
mod error;
mod http_client;
mod models;

pub use api::AuthApi;
pub use error::AuthError;
pub use http_client::HttpAuthApi;
pub use models::{AuthGrant, Credentials, ProfilePatch, Registration, TokenPair};

#[cfg(feature = "mock")]
pub use api::MockAuthApi;
