//! Runtime configuration read from the environment.

use crate::url_validator::{validate_api_base, UrlValidationError};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_API_BASE: &str = "https://bondmediastudio.com/api";
pub const DEFAULT_TOKEN_COOKIE: &str = "studio-token";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Artificial delay before a stubbed submission settles.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
    #[error("invalid STUDIO_API_BASE: {0}")]
    ApiBase(#[from] UrlValidationError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub api_base: Url,
    /// Name of the cookie holding the bearer token.
    pub token_cookie: String,
    pub submit_delay: Duration,
    /// Talk to the real project endpoints instead of the coming-soon stub.
    pub live_store: bool,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("STUDIO_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "STUDIO_BIND",
                message: e.to_string(),
            })?;

        let api_base =
            validate_api_base(&lookup("STUDIO_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()))?;

        let token_cookie = lookup("STUDIO_TOKEN_COOKIE")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_COOKIE.to_string());

        let submit_delay = match lookup("STUDIO_SUBMIT_DELAY_MS") {
            Some(ms) => Duration::from_millis(ms.trim().parse().map_err(
                |e: std::num::ParseIntError| ConfigError::Invalid {
                    key: "STUDIO_SUBMIT_DELAY_MS",
                    message: e.to_string(),
                },
            )?),
            None => DEFAULT_SUBMIT_DELAY,
        };

        let live_store = match lookup("STUDIO_LIVE_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "STUDIO_LIVE_STORE",
                    message: format!("expected true/false, got {}", other),
                })
            }
        };

        let public_dir = PathBuf::from(
            lookup("STUDIO_PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),
        );

        Ok(Self {
            bind,
            api_base,
            token_cookie,
            submit_delay,
            live_store,
            public_dir,
        })
    }

    /// Absolute URL of a backend endpoint, e.g. `endpoint("/me")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.as_str().trim_end_matches('/'), path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: ([127, 0, 0, 1], 3000).into(),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default api base"),
            token_cookie: DEFAULT_TOKEN_COOKIE.to_string(),
            submit_delay: DEFAULT_SUBMIT_DELAY,
            live_store: false,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}
