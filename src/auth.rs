//! Session resolution.
//!
//! The bearer token lives in a cookie whose name comes from configuration.
//! Identity is owned by the backend: the token is presented to `GET /me` and
//! whatever user comes back is the session. No token means an anonymous
//! session and no network call.

use crate::models::{SessionIdentity, UserRecord};
use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for the identity lookup
pub const IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity endpoint returned status {0}")]
    Status(u16),
    #[error("identity request failed: {0}")]
    Transport(String),
    #[error("identity response could not be decoded: {0}")]
    Decode(String),
}

impl IdentityError {
    /// HTTP status reported by the failure, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            IdentityError::Status(code) => Some(*code),
            IdentityError::Transport(_) | IdentityError::Decode(_) => None,
        }
    }
}

/// Answers "who is this token".
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn me(&self, token: &str) -> Result<UserRecord, IdentityError>;
}

// ============================================================================
// HTTP Client
// ============================================================================

#[derive(Deserialize)]
struct MeResponse {
    user: UserRecord,
}

pub struct HttpIdentityClient {
    client: reqwest::Client,
    me_url: String,
}

impl HttpIdentityClient {
    pub fn new(me_url: String) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(IDENTITY_TIMEOUT)
            .build()
            .map_err(|e| IdentityError::Transport(e.to_string()))?;
        Ok(Self { client, me_url })
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn me(&self, token: &str) -> Result<UserRecord, IdentityError> {
        let response = self
            .client
            .get(&self.me_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| match e.status() {
                Some(status) => IdentityError::Status(status.as_u16()),
                None => IdentityError::Transport(e.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status(status.as_u16()));
        }

        let body: MeResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;
        Ok(body.user)
    }
}

// ============================================================================
// Session Functions
// ============================================================================

/// Read the bearer token from the cookie jar. Blank values count as absent.
pub fn read_token(jar: &CookieJar, cookie_name: &str) -> Option<String> {
    jar.get(cookie_name)
        .map(|cookie| cookie.value().trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Resolve the session for an optional bearer token.
pub async fn resolve_session(token: Option<&str>, client: &dyn IdentityClient) -> SessionIdentity {
    let Some(token) = token else {
        debug!("no session token, anonymous session");
        return SessionIdentity::anonymous();
    };

    match client.me(token).await {
        Ok(user) => {
            debug!(user = %user.name, "session resolved");
            SessionIdentity::authenticated(user)
        }
        Err(err) => {
            warn!(error = %err, "session lookup failed");
            SessionIdentity::failed(err.status_code())
        }
    }
}
