//! Authentication endpoints.
//!
//! The backend issues a session cookie on login; the client's cookie
//! store replays it, so no token handling happens here.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Backend's answer to a login attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Identity attached to the current session cookie, or the
/// unauthenticated marker when no session exists.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl ApiClient {
    /// Attempt to log in. On success the backend sets a session cookie
    /// which the shared cookie store carries on every later request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResult, ApiError> {
        self.post(
            "/auth/login",
            &LoginRequest {
                username,
                password: password.expose_secret(),
            },
        )
        .await
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post_empty("/auth/logout").await?;
        Ok(())
    }

    /// Fetch the identity bound to the current session cookie.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        self.get("/auth/user").await
    }
}
