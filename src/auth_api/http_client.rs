//! HTTP client for the Authentication Service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::api::AuthApi;
use super::error::AuthError;
use super::models::{AuthGrant, Credentials, ProfilePatch, Registration, TokenPair};
use crate::config::CoreConfig;
use crate::user::User;

/// JSON/HTTP implementation of [`AuthApi`].
pub struct HttpAuthApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(config: &CoreConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        // Ensure base_url doesn't have trailing slash
        let base_url = config.api_base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
        response
            .json()
            .await
            .map_err(|err| AuthError::Network(format!("invalid response body: {err}")))
    }

    /// Pull a human-readable reason out of an error response body, falling
    /// back to the status line.
    async fn error_message(response: reqwest::Response) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        let status = response.status();
        let parsed: Option<ErrorBody> = response.json().await.ok();
        parsed
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| format!("request failed with status {status}"))
    }

    /// Map a non-success status onto the error taxonomy. What an
    /// authorization failure means depends on the endpoint, so the caller
    /// supplies it.
    fn classify(status: StatusCode, message: String, on_unauthorized: AuthError) -> AuthError {
        match status.as_u16() {
            401 | 403 => on_unauthorized,
            423 => AuthError::AccountLocked,
            429 => AuthError::RateLimited,
            _ => AuthError::Network(message),
        }
    }

    async fn reject(response: reqwest::Response, on_unauthorized: AuthError) -> AuthError {
        let status = response.status();
        let message = Self::error_message(response).await;
        debug!("auth service rejected request: {} {}", status, message);
        Self::classify(status, message, on_unauthorized)
    }

    fn transport(err: reqwest::Error) -> AuthError {
        AuthError::Network(err.to_string())
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant, AuthError> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = Self::error_message(response).await;
            return Err(Self::classify(
                status,
                message.clone(),
                AuthError::InvalidCredentials(message),
            ));
        }
        Self::read_json(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, AuthError> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(registration)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = Self::error_message(response).await;
            return Err(Self::classify(
                status,
                message.clone(),
                AuthError::InvalidCredentials(message),
            ));
        }
        Self::read_json(response).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let response = self
            .client
            .post(self.url("/auth/refresh"))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            return Err(AuthError::RefreshFailed(message));
        }
        Self::read_json(response).await
    }

    async fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        let response = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response, AuthError::TokenExpired).await);
        }
        Self::read_json(response).await
    }

    async fn update_profile(
        &self,
        access_token: &str,
        patch: &ProfilePatch,
    ) -> Result<User, AuthError> {
        let response = self
            .client
            .patch(self.url("/auth/me"))
            .bearer_auth(access_token)
            .json(patch)
            .send()
            .await
            .map_err(Self::transport)?;

        if !response.status().is_success() {
            return Err(Self::reject(response, AuthError::TokenExpired).await);
        }
        Self::read_json(response).await
    }
}
