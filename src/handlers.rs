//! HTTP route handlers for the builder.
//!
//! The page is rendered server-side from the shared workspace; dialog
//! submissions post JSON to the `/api` routes below and get a
//! [`ActionResponse`] back. Each request opens a fresh dialog, runs it
//! against the configured store and reports the outcome.

use crate::auth::{read_token, resolve_session};
use crate::dialogs::{DeployDialog, DialogOutcome, LoadProjectDialog, LoginModal, LoginPrompt, ProModal};
use crate::editor::{FrameStep, LocalStash, DEFAULT_HTML};
use crate::models::{Device, HtmlHistory, SessionIdentity};
use crate::providers::{route, Route, MODELS, PROVIDERS};
use crate::templates::render_editor;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Result of a dialog action as seen by the client script.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub outcome: DialogOutcome,
    /// HTML to park in local storage before the login redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stash: Option<String>,
    /// Element id of the login prompt to open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_dialog: Option<&'static str>,
}

impl ActionResponse {
    fn new(outcome: DialogOutcome) -> Self {
        Self { outcome, stash: None, login_dialog: None }
    }

    /// Anonymous callers get the matching login prompt, with their edits
    /// stashed when they differ from the starter page.
    fn gated(outcome: DialogOutcome, html: Option<&str>) -> Self {
        let mut response = Self::new(outcome);
        if let DialogOutcome::LoginRequired { prompt } = &response.outcome {
            response.login_dialog = Some(login_dialog_id(prompt));
            let mut stash = LocalStash::default();
            if let Some(html) = html {
                stash.stash_if_changed(html);
            }
            response.stash = stash.take();
        }
        response
    }

    fn status(&self) -> StatusCode {
        match self.outcome {
            DialogOutcome::LoginRequired { .. } => StatusCode::UNAUTHORIZED,
            DialogOutcome::Invalid { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

fn login_dialog_id(prompt: &LoginPrompt) -> &'static str {
    if *prompt == LoginPrompt::SAVE {
        "login-save"
    } else if *prompt == LoginPrompt::LOAD {
        "login-load"
    } else if *prompt == LoginPrompt::GALLERY {
        "login-gallery"
    } else if *prompt == LoginPrompt::HELP {
        "login-help"
    } else {
        "login-default"
    }
}

async fn session_for(state: &AppState, jar: &CookieJar) -> (SessionIdentity, Option<String>) {
    let token = read_token(jar, &state.config.token_cookie);
    let session = resolve_session(token.as_deref(), state.identity.as_ref()).await;
    (session, token)
}

// ============================================================================
// Page Handlers
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>, jar: CookieJar) -> Html<String> {
    let (session, _) = session_for(&state, &jar).await;
    let editor = state.workspace().editor.clone();
    Html(render_editor(&editor, &session))
}

pub async fn me(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<SessionIdentity> {
    let (session, _) = session_for(&state, &jar).await;
    Json(session)
}

#[derive(Deserialize)]
pub struct HtmlPayload {
    #[serde(default)]
    pub html: String,
}

#[derive(Deserialize)]
pub struct PreviewPayload {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub prompt: String,
}

/// The rewritten document the preview iframe loads as `srcdoc`. Changed
/// documents land in the history.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PreviewPayload>,
) -> Html<String> {
    let mut workspace = state.workspace();
    let srcdoc = workspace.update(&payload.html, &payload.prompt).to_string();
    debug!(history = workspace.editor.history.len(), "preview updated");
    Html(srcdoc)
}

pub async fn default_html() -> Html<&'static str> {
    Html(DEFAULT_HTML)
}

pub async fn models() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "providers": PROVIDERS,
        "models": MODELS,
    }))
}

#[derive(Deserialize)]
pub struct RouteQuery {
    pub model: String,
    #[serde(default = "auto_provider")]
    pub provider: String,
}

fn auto_provider() -> String {
    "auto".to_string()
}

pub async fn model_route(Query(query): Query<RouteQuery>) -> Result<Json<Route>, StatusCode> {
    route(&query.model, &query.provider)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// ============================================================================
// Workspace Handlers
// ============================================================================

/// Current HTML plus the srcdoc the frame should show.
#[derive(Debug, Serialize)]
pub struct FrameResponse {
    pub html: String,
    pub srcdoc: String,
}

pub async fn history(State(state): State<Arc<AppState>>) -> Json<Vec<HtmlHistory>> {
    Json(state.workspace().editor.history.clone())
}

#[derive(Deserialize)]
pub struct RestorePayload {
    pub index: usize,
}

pub async fn restore_history(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RestorePayload>,
) -> Result<Json<FrameResponse>, StatusCode> {
    let mut workspace = state.workspace();
    if !workspace.restore(payload.index) {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(FrameResponse {
        html: workspace.editor.html.clone(),
        srcdoc: workspace.frame.srcdoc().to_string(),
    }))
}

pub async fn reset(State(state): State<Arc<AppState>>) -> Json<FrameResponse> {
    let mut workspace = state.workspace();
    workspace.reset();
    Json(FrameResponse {
        html: workspace.editor.html.clone(),
        srcdoc: workspace.frame.srcdoc().to_string(),
    })
}

#[derive(Deserialize)]
pub struct DevicePayload {
    pub device: Device,
}

pub async fn set_device(State(state): State<Arc<AppState>>, Json(payload): Json<DevicePayload>) -> StatusCode {
    state.workspace().set_device(payload.device);
    StatusCode::NO_CONTENT
}

/// Clear-then-reassign steps for reloading the frame.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<[FrameStep; 2]> {
    Json(state.workspace().frame.refresh_plan())
}

// ============================================================================
// Dialog Handlers
// ============================================================================

#[derive(Deserialize)]
pub struct DeployPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub prompts: Vec<String>,
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<DeployPayload>,
) -> ActionResponse {
    let (session, token) = session_for(&state, &jar).await;

    let mut dialog = DeployDialog::default();
    if let Some(prompt) = dialog.open(&session) {
        return ActionResponse::gated(DialogOutcome::LoginRequired { prompt }, Some(&payload.html));
    }
    dialog.title = payload.title;
    let outcome = dialog
        .submit(&session, token.as_deref(), &payload.html, &payload.prompts, state.store.as_ref())
        .await;
    debug!(?outcome, "deploy settled");

    ActionResponse::gated(outcome, Some(&payload.html))
}

#[derive(Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub url: String,
}

pub async fn import_project(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<ImportPayload>,
) -> ActionResponse {
    let (session, token) = session_for(&state, &jar).await;

    let mut dialog = LoadProjectDialog::default();
    if let Some(prompt) = dialog.open(&session) {
        return ActionResponse::gated(DialogOutcome::LoginRequired { prompt }, None);
    }
    dialog.url = payload.url.trim().to_string();
    let outcome = dialog.submit(&session, token.as_deref(), state.store.as_ref()).await;
    debug!(?outcome, "import settled");

    ActionResponse::gated(outcome, None)
}

pub async fn upgrade(Json(payload): Json<HtmlPayload>) -> ActionResponse {
    let mut stash = LocalStash::default();
    let notice = ProModal { open: true }.upgrade(&payload.html, &mut stash);
    ActionResponse {
        outcome: DialogOutcome::Settled { notice },
        stash: stash.take(),
        login_dialog: None,
    }
}

#[derive(Serialize)]
pub struct StashResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stash: Option<String>,
}

/// Confirming any login prompt parks the current edits before the redirect.
pub async fn login(Json(payload): Json<HtmlPayload>) -> Json<StashResponse> {
    let mut stash = LocalStash::default();
    LoginModal::new(LoginPrompt::DEFAULT, Some(payload.html)).confirm(&mut stash);
    Json(StashResponse { stash: stash.take() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{IdentityClient, IdentityError};
    use crate::config::Config;
    use crate::dialogs::NoticeLevel;
    use crate::models::UserRecord;
    use crate::store::ComingSoonStore;
    use async_trait::async_trait;
    use axum_extra::extract::cookie::Cookie;
    use std::time::Duration;

    struct StaticIdentity;

    #[async_trait]
    impl IdentityClient for StaticIdentity {
        async fn me(&self, token: &str) -> Result<UserRecord, IdentityError> {
            if token != "good" {
                return Err(IdentityError::Status(401));
            }
            Ok(UserRecord {
                id: "1".into(),
                name: "alice".into(),
                fullname: "Alice".into(),
                avatar_url: None,
                is_pro: false,
                is_local_use: false,
            })
        }
    }

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Config::default(),
            Arc::new(StaticIdentity),
            Arc::new(ComingSoonStore::new(Duration::ZERO)),
        ))
    }

    fn signed_in_jar() -> CookieJar {
        CookieJar::new().add(Cookie::new("studio-token", "good"))
    }

    #[tokio::test]
    async fn test_me_reports_identity() {
        let Json(anon) = me(State(state()), CookieJar::new()).await;
        assert!(!anon.is_signed_in());

        let Json(alice) = me(State(state()), signed_in_jar()).await;
        assert_eq!(alice.user.map(|u| u.name), Some("alice".to_string()));

        let bad = CookieJar::new().add(Cookie::new("studio-token", "stale"));
        let Json(failed) = me(State(state()), bad).await;
        assert_eq!(failed.err_code, Some(401));
    }

    #[tokio::test]
    async fn test_index_renders_builder() {
        let Html(page) = index(State(state()), CookieJar::new()).await;
        assert!(page.contains("id=\"preview-frame\""));
        assert!(page.contains("login-save"));
    }

    fn preview_payload(html: &str, prompt: &str) -> Json<PreviewPayload> {
        Json(PreviewPayload { html: html.into(), prompt: prompt.into() })
    }

    #[tokio::test]
    async fn test_preview_rewrites_document() {
        let Html(doc) = preview(State(state()), preview_payload("<body><p>x</p></body>", "")).await;
        assert!(doc.contains("data-studio-navigation"));
        assert!(doc.contains("data-studio-attribution"));
        assert!(doc.ends_with("</body>"));
    }

    #[tokio::test]
    async fn test_preview_updates_feed_history_and_restore() {
        let state = state();
        preview(State(state.clone()), preview_payload("<body><p>one</p></body>", "first")).await;
        preview(State(state.clone()), preview_payload("<body><p>two</p></body>", "second")).await;
        preview(State(state.clone()), preview_payload("<body><p>two</p></body>", "")).await;

        let Json(entries) = history(State(state.clone())).await;
        let prompts: Vec<_> = entries.iter().map(|entry| entry.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["second", "first"]);

        let Json(restored) = restore_history(State(state.clone()), Json(RestorePayload { index: 1 }))
            .await
            .unwrap();
        assert_eq!(restored.html, "<body><p>one</p></body>");
        assert!(restored.srcdoc.contains("data-studio-navigation"));

        let Html(page) = index(State(state.clone()), CookieJar::new()).await;
        assert!(page.contains("&lt;p&gt;one&lt;/p&gt;"));
        assert!(page.contains(r#"<span id="history-count">2</span> edits"#));

        let missing = restore_history(State(state.clone()), Json(RestorePayload { index: 5 })).await;
        assert_eq!(missing.err(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_reset_device_and_refresh() {
        let state = state();
        preview(State(state.clone()), preview_payload("<body><p>one</p></body>", "first")).await;
        assert_eq!(
            set_device(State(state.clone()), Json(DevicePayload { device: Device::Mobile })).await,
            StatusCode::NO_CONTENT
        );

        let Json(frame) = reset(State(state.clone())).await;
        assert_eq!(frame.html, DEFAULT_HTML);
        assert_eq!(state.workspace().editor.device, Device::Mobile);
        assert_eq!(state.workspace().editor.history.len(), 1);

        let Json(plan) = refresh(State(state.clone())).await;
        assert_eq!(plan[0], FrameStep::Clear);
        assert!(matches!(&plan[1], FrameStep::Assign { srcdoc, .. } if *srcdoc == frame.srcdoc));
    }

    #[tokio::test]
    async fn test_model_route_resolves_auto_provider() {
        let query = RouteQuery { model: "moonshotai/Kimi-K2-Instruct".into(), provider: auto_provider() };
        let Json(resolved) = model_route(Query(query)).await.unwrap();
        assert_eq!(resolved.provider, "groq");
        assert_eq!(resolved.max_tokens, 16_384);

        let query = RouteQuery { model: "moonshotai/Kimi-K2-Instruct".into(), provider: "nebius".into() };
        assert_eq!(model_route(Query(query)).await.err(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_anonymous_deploy_stashes_edits() {
        let payload = DeployPayload {
            title: "Site".into(),
            html: "<p>edited</p>".into(),
            prompts: vec![],
        };
        let response = create_project(State(state()), CookieJar::new(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.login_dialog, Some("login-save"));
        assert_eq!(response.stash.as_deref(), Some("<p>edited</p>"));
    }

    #[tokio::test]
    async fn test_anonymous_deploy_of_starter_page_stashes_nothing() {
        let payload = DeployPayload {
            title: "Site".into(),
            html: DEFAULT_HTML.into(),
            prompts: vec![],
        };
        let response = create_project(State(state()), CookieJar::new(), Json(payload)).await;
        assert_eq!(response.stash, None);
    }

    #[tokio::test]
    async fn test_deploy_without_title_is_rejected() {
        let payload = DeployPayload { title: "  ".into(), html: "<p></p>".into(), prompts: vec![] };
        let response = create_project(State(state()), signed_in_jar(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deploy_is_coming_soon() {
        let payload = DeployPayload { title: "Site".into(), html: "<p></p>".into(), prompts: vec![] };
        let response = create_project(State(state()), signed_in_jar(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);
        match response.outcome {
            DialogOutcome::Settled { notice } => {
                assert_eq!(notice.level, NoticeLevel::Info);
                assert!(notice.message.starts_with("Project deployment coming soon!"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_import_validates_url() {
        let payload = ImportPayload { url: "https://example.com/projects/a/b".into() };
        let response = import_project(State(state()), signed_in_jar(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        match response.outcome {
            DialogOutcome::Invalid { notice } => {
                assert_eq!(notice.message, "Please enter a valid Bond Media Studio project URL.")
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let payload = ImportPayload { url: "not a url".into() };
        let response = import_project(State(state()), signed_in_jar(), Json(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_anonymous_opens_load_prompt() {
        let payload = ImportPayload { url: "https://bondmediastudio.com/projects/a/b".into() };
        let response = import_project(State(state()), CookieJar::new(), Json(payload)).await;
        assert_eq!(response.login_dialog, Some("login-load"));
        assert_eq!(response.stash, None);
    }

    #[tokio::test]
    async fn test_upgrade_is_coming_soon_and_stashes() {
        let response = upgrade(Json(HtmlPayload { html: "<p>mine</p>".into() })).await;
        assert_eq!(response.stash.as_deref(), Some("<p>mine</p>"));
        match response.outcome {
            DialogOutcome::Settled { notice } => assert!(notice.message.starts_with("Subscription coming soon!")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_stash_skips_starter_page() {
        let Json(response) = login(Json(HtmlPayload { html: DEFAULT_HTML.into() })).await;
        assert_eq!(response.stash, None);
        let Json(response) = login(Json(HtmlPayload { html: "<h1>new</h1>".into() })).await;
        assert_eq!(response.stash.as_deref(), Some("<h1>new</h1>"));
    }

    #[tokio::test]
    async fn test_models_lists_routing_tables() {
        let Json(value) = models().await;
        assert_eq!(value["models"].as_array().map(|m| m.len()), Some(MODELS.len()));
        assert_eq!(value["providers"][0]["id"], "fireworks-ai");
    }
}
