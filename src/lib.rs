//! Studio library - re-exports for testing and external use.
//!
//! The builder serves one page: an HTML source pane with a live preview.
//! Everything the preview needs (navigation rewriting, attribution) lives in
//! `preview`; identity and project persistence are delegated to the backend
//! through the `IdentityClient` and `ProjectStore` traits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod auth;
pub mod config;
pub mod dialogs;
pub mod editor;
pub mod handlers;
pub mod models;
pub mod preview;
pub mod providers;
pub mod store;
pub mod templates;
pub mod url_validator;

use auth::{HttpIdentityClient, IdentityClient, IdentityError};
use config::Config;
use store::{ComingSoonStore, HttpProjectStore, ProjectStore, StoreError};

// ============================================================================
// Application State
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub identity: Arc<dyn IdentityClient>,
    pub store: Arc<dyn ProjectStore>,
    /// The one editor this server renders and previews.
    pub workspace: Arc<Mutex<Workspace>>,
}

impl AppState {
    pub fn new(config: Config, identity: Arc<dyn IdentityClient>, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            config,
            identity,
            store,
            workspace: Arc::new(Mutex::new(Workspace::default())),
        }
    }

    /// Never hold the guard across an `.await`.
    pub fn workspace(&self) -> MutexGuard<'_, Workspace> {
        self.workspace.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wire the HTTP identity client and pick the project store: the live
    /// backend when `live_store` is set, otherwise the coming-soon stub.
    pub fn from_config(config: Config) -> Result<Self, StartupError> {
        let identity: Arc<dyn IdentityClient> =
            Arc::new(HttpIdentityClient::new(config.endpoint("/me"))?);

        let store: Arc<dyn ProjectStore> = if config.live_store {
            Arc::new(HttpProjectStore::new(config.api_base.as_str())?)
        } else {
            Arc::new(ComingSoonStore::new(config.submit_delay))
        };

        Ok(Self::new(config, identity, store))
    }
}

// Re-export commonly used types
pub use models::{
    CreateProjectRequest, CreateProjectResponse, Device, HtmlHistory, Project, SessionIdentity,
    UserRecord,
};

pub use preview::{
    classify, inject_navigation_handler, inject_watermark, render_srcdoc, simulate_click,
    ClickOutcome, Document, NavigationIntent,
};

pub use dialogs::{DeployDialog, DialogOutcome, LoadProjectDialog, LoginModal, LoginPrompt, Notice, ProModal};

pub use editor::{EditorState, LocalStash, PreviewFrame, Workspace, DEFAULT_HTML};

pub use templates::{base_html, render_editor, STYLE};

pub use url_validator::{check_if_url_is_valid, parse_project_url, ProjectRef, UrlValidationError};
