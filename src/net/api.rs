//! REST API helpers for the auth and overview endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side and native tests: every call fails with
//! [`ApiError::Unavailable`], since the bearer token only exists in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `Result<_, ApiError>`; callers decide whether a failure is
//! fatal. The session store logs and keeps its state, the navigation guard
//! turns an admin-check failure into a login redirect.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::UserOverview;
#[cfg(feature = "hydrate")]
use super::types::{Credentials, TokenResponse};

pub const OVERVIEW_PATH: &str = "/api/me/overview";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";

/// Errors produced by REST calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, abort).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected schema.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// No HTTP transport in this build.
    #[error("HTTP transport unavailable outside the browser")]
    Unavailable,
}

impl ApiError {
    /// Whether the server rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// Source of the current user's overview. Mocked in tests.
#[async_trait::async_trait(?Send)]
pub trait OverviewApi {
    /// Fetch `/api/me/overview` on behalf of `token`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails, the status is not a
    /// success, or the body is malformed.
    async fn fetch_overview(&self, token: &str) -> Result<UserOverview, ApiError>;
}

/// HTTP client rooted at the API origin (empty for same-origin).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpApi {
    base: String,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into().trim_end_matches('/').to_owned() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, rejected credentials,
    /// or a malformed response.
    pub async fn login(&self, email: &str, password: &str) -> Result<super::types::TokenResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_credentials(&self.url(LOGIN_PATH), &Credentials { email, password }).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(LOGIN_PATH), email, password);
            Err(ApiError::Unavailable)
        }
    }

    /// Create an account and receive its bearer token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, a rejected
    /// registration, or a malformed response.
    pub async fn register(&self, email: &str, password: &str) -> Result<super::types::TokenResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            post_credentials(&self.url(REGISTER_PATH), &Credentials { email, password }).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(REGISTER_PATH), email, password);
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl OverviewApi for HttpApi {
    async fn fetch_overview(&self, token: &str) -> Result<UserOverview, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&self.url(OVERVIEW_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(|e| ApiError::Request(e.to_string()))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(OVERVIEW_PATH), token);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
async fn post_credentials(url: &str, body: &Credentials<'_>) -> Result<TokenResponse, ApiError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Request(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    read_json(resp).await
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    resp.json::<T>().await.map_err(|e| ApiError::Parse(e.to_string()))
}
