//! Data models for the studio application.
//!
//! Session identity, editor history, and the request/response shapes spoken
//! with the identity and project backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Session Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
    /// Set when the backend runs without a real identity provider.
    #[serde(default)]
    pub is_local_use: bool,
}

/// Who is looking at the page. Derived once per page load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionIdentity {
    pub user: Option<UserRecord>,
    #[serde(rename = "errCode")]
    pub err_code: Option<u16>,
}

impl SessionIdentity {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: UserRecord) -> Self {
        Self {
            user: Some(user),
            err_code: None,
        }
    }

    pub fn failed(err_code: Option<u16>) -> Self {
        Self {
            user: None,
            err_code,
        }
    }

    /// Deploy and import are offered only to users with a backend id.
    pub fn is_signed_in(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.id.is_empty())
    }
}

// ============================================================================
// Editor Types
// ============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Desktop, Device::Mobile];

    pub fn name(&self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HtmlHistory {
    pub html: String,
    pub created_at: DateTime<Utc>,
    pub prompt: String,
}

// ============================================================================
// Project API Shapes
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    /// `username/namespace`
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub prompts: Vec<String>,
}

/// Body of `POST /me/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProjectRequest {
    pub title: String,
    pub html: String,
    pub prompts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateProjectResponse {
    pub ok: bool,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Success body of `POST /me/projects/:username/:namespace`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportProjectResponse {
    pub project: Project,
}

/// Error body returned by the project endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_from_backend_json() {
        let user: UserRecord = serde_json::from_str(
            r#"{"id":"u1","name":"alice","fullname":"Alice A","avatarUrl":"https://x/a.png","isPro":true}"#,
        )
        .unwrap();
        assert_eq!(user.name, "alice");
        assert!(user.is_pro);
        assert!(!user.is_local_use);
        assert_eq!(user.avatar_url.as_deref(), Some("https://x/a.png"));
    }

    #[test]
    fn test_session_identity_wire_shape() {
        let json = serde_json::to_value(SessionIdentity::failed(Some(401))).unwrap();
        assert_eq!(json, serde_json::json!({"user": null, "errCode": 401}));
    }

    #[test]
    fn test_signed_in_requires_id() {
        let mut user = UserRecord {
            id: String::new(),
            name: "n".into(),
            fullname: String::new(),
            avatar_url: None,
            is_pro: false,
            is_local_use: true,
        };
        assert!(!SessionIdentity::authenticated(user.clone()).is_signed_in());
        user.id = "42".into();
        assert!(SessionIdentity::authenticated(user).is_signed_in());
        assert!(!SessionIdentity::anonymous().is_signed_in());
    }

    #[test]
    fn test_error_body_redirect_is_optional() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"nope"}"#).unwrap();
        assert_eq!(body.redirect, None);
    }
}
