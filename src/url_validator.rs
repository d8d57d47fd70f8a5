//! URL validation for project import and backend configuration.
//!
//! - Project URLs must point at `bondmediastudio.com/projects/<user>/<project>`
//! - The backend API base must be an absolute http(s) URL with a host

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static PROJECT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(bondmediastudio\.com)/projects/([A-Za-z0-9_-]+)/([A-Za-z0-9_-]+)$")
        .expect("project url pattern")
});

/// Result of URL validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    /// Nothing was entered
    Empty,
    /// Not a `bondmediastudio.com/projects/<user>/<project>` URL
    NotAProjectUrl(String),
    /// URL is malformed or cannot be parsed
    InvalidUrl(String),
    /// URL uses a scheme other than http or https
    UnsupportedScheme(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlValidationError::Empty => write!(f, "No URL given"),
            UrlValidationError::NotAProjectUrl(url) => {
                write!(f, "Not a Bond Media Studio project URL: {}", url)
            }
            UrlValidationError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            UrlValidationError::UnsupportedScheme(scheme) => {
                write!(f, "Only HTTP(S) URLs are allowed, got {}", scheme)
            }
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// A project addressed by its owner and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    pub username: String,
    pub namespace: String,
}

impl ProjectRef {
    /// Backend path of the import endpoint for this project.
    pub fn import_path(&self) -> String {
        format!(
            "/me/projects/{}/{}",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.namespace)
        )
    }
}

/// Whether `url` is a project URL like
/// `https://bondmediastudio.com/projects/username/project`.
pub fn check_if_url_is_valid(url: &str) -> bool {
    PROJECT_URL.is_match(url)
}

/// Parse a project URL into its owner and namespace.
pub fn parse_project_url(url: &str) -> Result<ProjectRef, UrlValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let caps = PROJECT_URL
        .captures(url)
        .ok_or_else(|| UrlValidationError::NotAProjectUrl(url.to_string()))?;

    Ok(ProjectRef {
        username: caps[3].to_string(),
        namespace: caps[4].to_string(),
    })
}

/// Validate the configured backend base URL.
pub fn validate_api_base(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str).map_err(|e| UrlValidationError::InvalidUrl(e.to_string()))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(UrlValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlValidationError::InvalidUrl("No host in URL".to_string()));
    }

    Ok(url)
}
