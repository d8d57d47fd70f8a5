//! Project persistence capability.
//!
//! Deploy and import talk to the backend through [`ProjectStore`]. The
//! current build wires in [`ComingSoonStore`], which settles every call with
//! a "not yet available" answer after a fixed delay. [`HttpProjectStore`]
//! speaks the real endpoints and is selected with `STUDIO_LIVE_STORE`.

use crate::models::{
    ApiErrorBody, CreateProjectRequest, CreateProjectResponse, ImportProjectResponse, Project,
};
use crate::url_validator::ProjectRef;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Deployment,
    Import,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Deployment => "Project deployment",
            Feature::Import => "Project import",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{} coming soon! This feature will be available in the full version.", .0.label())]
    NotYetAvailable(Feature),
    #[error("{message}")]
    Rejected {
        message: String,
        redirect: Option<String>,
    },
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(
        &self,
        token: &str,
        request: &CreateProjectRequest,
    ) -> Result<CreateProjectResponse, StoreError>;

    async fn import_project(&self, token: &str, project: &ProjectRef) -> Result<Project, StoreError>;
}

// ============================================================================
// Coming-Soon Stub
// ============================================================================

pub struct ComingSoonStore {
    delay: Duration,
}

impl ComingSoonStore {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ProjectStore for ComingSoonStore {
    async fn create_project(
        &self,
        _token: &str,
        request: &CreateProjectRequest,
    ) -> Result<CreateProjectResponse, StoreError> {
        debug!(title = %request.title, "deploy requested, store inert");
        tokio::time::sleep(self.delay).await;
        Err(StoreError::NotYetAvailable(Feature::Deployment))
    }

    async fn import_project(&self, _token: &str, project: &ProjectRef) -> Result<Project, StoreError> {
        debug!(username = %project.username, namespace = %project.namespace, "import requested, store inert");
        tokio::time::sleep(self.delay).await;
        Err(StoreError::NotYetAvailable(Feature::Import))
    }
}

// ============================================================================
// HTTP Store
// ============================================================================

pub struct HttpProjectStore {
    client: reqwest::Client,
    base: String,
}

impl HttpProjectStore {
    pub fn new(base: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        body: Option<&CreateProjectRequest>,
    ) -> Result<T, StoreError> {
        let mut request = self.client.post(self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "project request rejected");
            return Err(match response.json::<ApiErrorBody>().await {
                Ok(body) => StoreError::Rejected {
                    message: body.error,
                    redirect: body.redirect,
                },
                Err(_) => StoreError::Status(status.as_u16()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ProjectStore for HttpProjectStore {
    async fn create_project(
        &self,
        token: &str,
        request: &CreateProjectRequest,
    ) -> Result<CreateProjectResponse, StoreError> {
        self.post("/me/projects", token, Some(request)).await
    }

    async fn import_project(&self, token: &str, project: &ProjectRef) -> Result<Project, StoreError> {
        let response: ImportProjectResponse = self.post(&project.import_path(), token, None).await?;
        Ok(response.project)
    }
}
