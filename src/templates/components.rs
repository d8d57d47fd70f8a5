//! Shared HTML components for the builder shell.
//!
//! Contains the page shell, top bar, footer toolbar and preview iframe.

use crate::editor::EditorState;
use crate::models::{Device, HtmlHistory, SessionIdentity};

use super::styles::STYLE;

pub const SITE_NAME: &str = "Bond Media Studio";
pub const SITE_TITLE: &str = "Bond Media Studio | Build with AI ✨";
pub const SITE_URL: &str = "https://bondmediastudio.com";
pub const SITE_DESCRIPTION: &str = "Bond Media Studio is a web development tool that helps you build websites with AI, no code required. Let's deploy your website with Bond Media Studio and enjoy the magic of AI.";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Page Shell
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=1">
    <meta name="theme-color" content="#000000">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta property="og:title" content="{og_title}">
    <meta property="og:description" content="{description}">
    <meta property="og:url" content="{url}">
    <meta property="og:site_name" content="{site}">
    <meta property="og:image" content="{url}/banner.png">
    <meta property="og:image:width" content="1200">
    <meta property="og:image:height" content="630">
    <meta name="twitter:card" content="summary_large_image">
    <meta name="twitter:title" content="{og_title}">
    <meta name="twitter:description" content="{description}">
    <meta name="twitter:image" content="{url}/banner.png">
    <meta name="apple-mobile-web-app-capable" content="yes">
    <meta name="apple-mobile-web-app-title" content="{site}">
    <meta name="apple-mobile-web-app-status-bar-style" content="black-translucent">
    <link rel="icon" href="/public/favicon.svg">
    <link rel="apple-touch-icon" href="/public/favicon.svg">
    <script defer data-domain="bondmediastudio.com" src="https://plausible.io/js/script.js"></script>
    <style>{style}</style>
</head>
<body class="dark">
    {content}
</body>
</html>"##,
        title = html_escape(title),
        og_title = html_escape(SITE_TITLE),
        description = html_escape(SITE_DESCRIPTION),
        url = SITE_URL,
        site = SITE_NAME,
        style = STYLE,
        content = content,
    )
}

// ============================================================================
// Top Bar
// ============================================================================

pub fn top_bar(me: &SessionIdentity) -> String {
    let (load_button, deploy_button) = if me.is_signed_in() {
        (
            r#"<button class="btn" onclick="openDialog('load-dialog')">Load existing Project</button>"#,
            r#"<button class="btn primary" onclick="openDialog('deploy-dialog')">Deploy your Project</button>"#,
        )
    } else {
        (
            r#"<button class="btn" onclick="openDialog('login-load')">Load existing Project</button>"#,
            r#"<button class="btn primary" onclick="openDialog('login-save')">Save your Project</button>"#,
        )
    };

    let user_menu = match &me.user {
        Some(user) => {
            let pro = if user.is_pro {
                r#" <span class="pro-badge">PRO</span>"#
            } else {
                ""
            };
            format!(
                r#"<span class="user-badge">{}{}</span>"#,
                html_escape(&user.name),
                pro
            )
        }
        None => r#"<button class="btn" onclick="openDialog('login-default')">Log In</button>"#.to_string(),
    };

    format!(
        r#"<header class="top-bar">
            <img class="logo" src="/public/bond-media-main-logo.svg" alt="{site} Logo">
            <span class="spacer"></span>
            <button class="btn" onclick="openDialog('invite-dialog')">Explore</button>
            <button class="btn" onclick="openDialog('pro-dialog')">Upgrade</button>
            {load_button}
            {deploy_button}
            {user_menu}
        </header>"#,
        site = SITE_NAME,
    )
}

// ============================================================================
// Preview
// ============================================================================

pub fn preview_iframe(editor: &EditorState) -> String {
    format!(
        r#"<div class="preview-pane">
            <iframe id="preview-frame" class="{device}" title="Output" srcdoc="{srcdoc}"></iframe>
        </div>"#,
        device = editor.device.name(),
        srcdoc = html_escape(&editor.srcdoc()),
    )
}

// ============================================================================
// Footer Toolbar
// ============================================================================

pub fn footer_toolbar(editor: &EditorState, me: &SessionIdentity) -> String {
    let badge = match &me.user {
        Some(user) if user.is_local_use => r#"<span class="user-badge">Local Usage</span>"#,
        _ => "",
    };

    let hidden = if editor.history.is_empty() { " hidden" } else { "" };
    let history = format!(
        r#"<button class="btn" id="history-toggle"{hidden} onclick="toggleHistory()"><span id="history-count">{count}</span> edits</button>
            <div class="history-panel" id="history-panel">{entries}</div>"#,
        hidden = hidden,
        count = editor.history.len(),
        entries = history_entries(&editor.history),
    );

    let devices: String = Device::ALL
        .iter()
        .map(|device| {
            let active = if *device == editor.device { " active" } else { "" };
            format!(
                r#"<button class="device{active}" data-device="{name}" onclick="setDevice('{name}')">{name}</button>"#,
                active = active,
                name = device.name(),
            )
        })
        .collect();

    format!(
        r#"<footer class="footer-bar">
            {badge}
            <button class="btn" onclick="resetEditor()">New</button>
            {history}
            <span class="spacer"></span>
            <button class="btn" onclick="openDialog('login-gallery')">Gallery</button>
            <button class="btn" onclick="openDialog('login-help')">Help</button>
            <button class="btn" onclick="refreshPreview()">Refresh Preview</button>
            <div class="device-toggle">{devices}</div>
        </footer>"#
    )
}

/// One restore button per history entry, newest first.
pub fn history_entries(history: &[HtmlHistory]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let prompt = if entry.prompt.is_empty() { "Manual edit" } else { entry.prompt.as_str() };
            format!(
                r#"<button class="history-entry" onclick="restoreHistory({index})"><span>{prompt}</span><time>{time}</time></button>"#,
                index = index,
                prompt = html_escape(prompt),
                time = entry.created_at.format("%H:%M:%S"),
            )
        })
        .collect()
}
