//! Explicit login session.
//!
//! There is no ambient current-user global. A [`Session`] is constructed
//! with the client, passed to whatever needs identity, and refreshed
//! explicitly when the caller wants a fresh answer from the backend.

use secrecy::SecretString;
use thiserror::Error;
use tracing::instrument;

use crate::api::auth::SessionUser;
use crate::api::ApiClient;
use crate::error::ApiError;

/// Session-level failures.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend answered the login attempt and said no.
    #[error("Login rejected: {0}")]
    LoginRejected(String),
    /// The request itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The current session against the backend.
///
/// Holds the last identity the backend reported. The session cookie
/// itself lives inside the client's cookie store, so every clone of the
/// same [`ApiClient`] shares the authenticated state.
#[derive(Debug, Clone)]
pub struct Session {
    client: ApiClient,
    user: Option<SessionUser>,
}

impl Session {
    /// A fresh, unauthenticated session over the given client.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, user: None }
    }

    /// Log in and record the resulting identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::LoginRejected`] when the backend refuses
    /// the credentials, or [`SessionError::Api`] on transport failure.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<&SessionUser, SessionError> {
        let result = self.client.login(username, password).await?;
        if !result.success {
            return Err(SessionError::LoginRejected(result.message));
        }
        self.refresh().await
    }

    /// Re-fetch the identity from the backend and cache it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] on transport failure or rejection.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<&SessionUser, SessionError> {
        let user = self.client.current_user().await?;
        Ok(self.user.insert(user))
    }

    /// Log out and drop the cached identity.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Api`] on transport failure or rejection.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.client.logout().await?;
        self.user = None;
        Ok(())
    }

    /// Last identity reported by the backend, if any.
    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Whether the cached identity is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_authenticated)
    }

    /// The client this session authenticates.
    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ConsoleConfig;

    async fn session_for(server: &MockServer) -> Session {
        let client =
            ApiClient::new(&ConsoleConfig::with_api_url(server.uri())).expect("client should build");
        Session::new(client)
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_session_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "message": "Invalid credentials"
            })))
            .mount(&server)
            .await;

        let mut session = session_for(&server).await;
        let err = session
            .login("ops", &SecretString::from("wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::LoginRejected(m) if m == "Invalid credentials"));
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_login_then_logout_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "message": "ok"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "username": "ops",
                "is_authenticated": true
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "success"})),
            )
            .mount(&server)
            .await;

        let mut session = session_for(&server).await;
        let user = session
            .login("ops", &SecretString::from("hunter2"))
            .await
            .expect("login should succeed");
        assert_eq!(user.username.as_deref(), Some("ops"));
        assert!(session.is_authenticated());

        session.logout().await.expect("logout should succeed");
        assert!(!session.is_authenticated());
    }
}
