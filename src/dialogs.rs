//! Action dialogs: deploy, project import, pro upgrade and login.
//!
//! Each dialog is a small state machine `Closed -> Open -> Submitting`, and
//! settling lands back on `Closed` or `Open`. Only an open dialog accepts a
//! submission. Submissions are split into `begin` (validation and gating, synchronous) and `settle`
//! (interpreting the store's answer) so callers can run the store call in
//! between however they like; `submit` does all three.

use crate::editor::LocalStash;
use crate::models::{CreateProjectRequest, CreateProjectResponse, Project, SessionIdentity};
use crate::store::{ProjectStore, StoreError};
use crate::url_validator::{check_if_url_is_valid, parse_project_url, ProjectRef};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogPhase {
    #[default]
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One-shot user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginPrompt {
    pub title: &'static str,
    pub description: &'static str,
}

impl LoginPrompt {
    pub const DEFAULT: LoginPrompt = LoginPrompt {
        title: "Log In to use Bond Media Studio for free",
        description: "Log In through Bond Media Studio to continue creating amazing websites and unlock additional features.",
    };
    pub const SAVE: LoginPrompt = LoginPrompt {
        title: "Log In to save your Project",
        description: "Log In through Bond Media Studio to save your project and unlock additional features.",
    };
    pub const LOAD: LoginPrompt = LoginPrompt {
        title: "Log In to load your Project",
        description: "Log In through Bond Media Studio to load an existing project and unlock additional features!",
    };
    pub const GALLERY: LoginPrompt = LoginPrompt {
        title: "Log In to access Bond Media Studio Gallery",
        description: "Log In through Bond Media Studio to browse our gallery of amazing website templates and examples.",
    };
    pub const HELP: LoginPrompt = LoginPrompt {
        title: "Log In to get Help",
        description: "Log In through Bond Media Studio to access our help center and support resources.",
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DialogOutcome {
    /// Caller is anonymous; show the login prompt instead.
    LoginRequired { prompt: LoginPrompt },
    /// Input rejected before anything was sent.
    Invalid { notice: Notice },
    /// A submission is already in flight.
    Busy,
    /// The dialog was never opened, or was closed before submitting.
    Dismissed,
    Settled { notice: Notice },
    Imported { project: Project, notice: Notice },
    Redirect { to: String },
}

// ============================================================================
// Deploy Dialog
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct DeployDialog {
    phase: DialogPhase,
    pub title: String,
}

impl DeployDialog {
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    /// Anonymous users get the login prompt instead of the dialog.
    pub fn open(&mut self, session: &SessionIdentity) -> Option<LoginPrompt> {
        if !session.is_signed_in() {
            return Some(LoginPrompt::SAVE);
        }
        if self.phase == DialogPhase::Closed {
            self.phase = DialogPhase::Open;
        }
        None
    }

    pub fn close(&mut self) {
        if self.phase != DialogPhase::Submitting {
            self.phase = DialogPhase::Closed;
        }
    }

    pub fn begin(
        &mut self,
        session: &SessionIdentity,
        html: &str,
        prompts: &[String],
    ) -> Result<CreateProjectRequest, DialogOutcome> {
        if !session.is_signed_in() {
            return Err(DialogOutcome::LoginRequired { prompt: LoginPrompt::SAVE });
        }
        match self.phase {
            DialogPhase::Submitting => return Err(DialogOutcome::Busy),
            DialogPhase::Closed => return Err(DialogOutcome::Dismissed),
            DialogPhase::Open => {}
        }
        if self.title.trim().is_empty() {
            return Err(DialogOutcome::Invalid {
                notice: Notice::error("Please enter a title for your project."),
            });
        }
        self.phase = DialogPhase::Submitting;
        Ok(CreateProjectRequest {
            title: self.title.trim().to_string(),
            html: html.to_string(),
            prompts: prompts.to_vec(),
        })
    }

    pub fn settle(&mut self, result: Result<CreateProjectResponse, StoreError>) -> DialogOutcome {
        let (outcome, next) = match result {
            Ok(response) if response.ok => (
                DialogOutcome::Redirect { to: format!("/projects/{}?deploy=true", response.path) },
                DialogPhase::Closed,
            ),
            Ok(response) => (
                DialogOutcome::Settled {
                    notice: Notice::error(
                        response.error.unwrap_or_else(|| "Failed to create project".to_string()),
                    ),
                },
                DialogPhase::Open,
            ),
            Err(StoreError::NotYetAvailable(feature)) => (
                DialogOutcome::Settled {
                    notice: Notice::info(StoreError::NotYetAvailable(feature).to_string()),
                },
                DialogPhase::Closed,
            ),
            Err(StoreError::Rejected { message, .. }) => (
                DialogOutcome::Settled { notice: Notice::error(message) },
                DialogPhase::Open,
            ),
            Err(err) => (
                DialogOutcome::Settled { notice: Notice::error(err.to_string()) },
                DialogPhase::Open,
            ),
        };
        self.phase = next;
        outcome
    }

    pub async fn submit(
        &mut self,
        session: &SessionIdentity,
        token: Option<&str>,
        html: &str,
        prompts: &[String],
        store: &dyn ProjectStore,
    ) -> DialogOutcome {
        let request = match self.begin(session, html, prompts) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        info!(title = %request.title, "deploying project");
        let result = store.create_project(token.unwrap_or_default(), &request).await;
        self.settle(result)
    }
}

// ============================================================================
// Load Project Dialog
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct LoadProjectDialog {
    phase: DialogPhase,
    pub url: String,
}

impl LoadProjectDialog {
    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn open(&mut self, session: &SessionIdentity) -> Option<LoginPrompt> {
        if !session.is_signed_in() {
            return Some(LoginPrompt::LOAD);
        }
        if self.phase == DialogPhase::Closed {
            self.phase = DialogPhase::Open;
        }
        None
    }

    /// Normalize the field when it loses focus. Returns a notice for
    /// invalid input; the raw text is kept so it can be corrected.
    pub fn on_blur(&mut self) -> Option<Notice> {
        let trimmed = self.url.trim().to_string();
        if trimmed.is_empty() {
            self.url.clear();
            return None;
        }
        if !check_if_url_is_valid(&trimmed) {
            return Some(Notice::error("Please enter a valid URL."));
        }
        self.url = trimmed;
        None
    }

    pub fn begin(&mut self, session: &SessionIdentity) -> Result<ProjectRef, DialogOutcome> {
        if !session.is_signed_in() {
            return Err(DialogOutcome::LoginRequired { prompt: LoginPrompt::LOAD });
        }
        match self.phase {
            DialogPhase::Submitting => return Err(DialogOutcome::Busy),
            DialogPhase::Closed => return Err(DialogOutcome::Dismissed),
            DialogPhase::Open => {}
        }
        if self.url.is_empty() {
            return Err(DialogOutcome::Invalid { notice: Notice::error("Please enter a URL.") });
        }
        let project = parse_project_url(&self.url).map_err(|_| DialogOutcome::Invalid {
            notice: Notice::error("Please enter a valid Bond Media Studio project URL."),
        })?;
        self.phase = DialogPhase::Submitting;
        Ok(project)
    }

    pub fn settle(&mut self, result: Result<Project, StoreError>) -> DialogOutcome {
        let (outcome, next) = match result {
            Ok(project) => {
                self.url.clear();
                (
                    DialogOutcome::Imported {
                        project,
                        notice: Notice::success("Project imported successfully!"),
                    },
                    DialogPhase::Closed,
                )
            }
            Err(StoreError::NotYetAvailable(feature)) => {
                self.url.clear();
                (
                    DialogOutcome::Settled {
                        notice: Notice::info(StoreError::NotYetAvailable(feature).to_string()),
                    },
                    DialogPhase::Closed,
                )
            }
            Err(StoreError::Rejected { redirect: Some(to), .. }) => {
                (DialogOutcome::Redirect { to }, DialogPhase::Closed)
            }
            Err(StoreError::Rejected { message, .. }) => (
                DialogOutcome::Settled { notice: Notice::error(message) },
                DialogPhase::Open,
            ),
            Err(_) => (
                DialogOutcome::Settled { notice: Notice::error("Failed to import the project.") },
                DialogPhase::Open,
            ),
        };
        self.phase = next;
        outcome
    }

    pub async fn submit(
        &mut self,
        session: &SessionIdentity,
        token: Option<&str>,
        store: &dyn ProjectStore,
    ) -> DialogOutcome {
        let project = match self.begin(session) {
            Ok(project) => project,
            Err(outcome) => return outcome,
        };
        info!(username = %project.username, namespace = %project.namespace, "importing project");
        let result = store.import_project(token.unwrap_or_default(), &project).await;
        self.settle(result)
    }
}

// ============================================================================
// Pro Modal
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProModal {
    pub open: bool,
}

impl ProModal {
    /// Subscription is not offered yet. Work in progress is stashed first so
    /// it survives the (future) checkout round-trip.
    pub fn upgrade(&mut self, html: &str, stash: &mut LocalStash) -> Notice {
        stash.stash_if_changed(html);
        self.open = false;
        Notice::info("Subscription coming soon! This feature will be available in the full version.")
    }
}

// ============================================================================
// Login Modal
// ============================================================================

#[derive(Debug, Clone)]
pub struct LoginModal {
    pub open: bool,
    pub prompt: LoginPrompt,
    pub html: Option<String>,
}

impl LoginModal {
    pub fn new(prompt: LoginPrompt, html: Option<String>) -> Self {
        Self { open: true, prompt, html }
    }

    /// Stash the editor HTML (if any, and if changed) ahead of the login
    /// redirect, then close.
    pub fn confirm(&mut self, stash: &mut LocalStash) {
        if let Some(html) = &self.html {
            stash.stash_if_changed(html);
        }
        self.open = false;
    }
}
