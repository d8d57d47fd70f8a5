//! CSS styles for the builder shell.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --bg: #000000;
    --panel: #0a0a0a;
    --panel-border: #262626;
    --fg: #fafafa;
    --muted: #a3a3a3;
    --accent: #3b82f6;
    --danger: #ef4444;
    --success: #22c55e;
    --info: #60a5fa;
    --dialog-bg: #ffffff;
    --dialog-fg: #0a0a0a;
    --dialog-muted: #737373;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

html, body {
    height: 100dvh;
    overflow: hidden;
    background: var(--bg);
    color: var(--fg);
    font-family: var(--font-inter-sans, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif);
    -webkit-font-smoothing: antialiased;
}

.studio {
    display: grid;
    grid-template-rows: auto 1fr auto;
    height: 100dvh;
}

.top-bar, .footer-bar {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    padding: 0.6rem 1rem;
    background: var(--panel);
    border-color: var(--panel-border);
}
.top-bar { border-bottom: 1px solid var(--panel-border); }
.footer-bar { border-top: 1px solid var(--panel-border); }
.top-bar .spacer, .footer-bar .spacer { flex: 1; }
.top-bar .logo { height: 28px; }

.workspace {
    display: grid;
    grid-template-columns: minmax(320px, 38%) 1fr;
    min-height: 0;
}

.source-pane {
    display: flex;
    flex-direction: column;
    border-right: 1px solid var(--panel-border);
    min-height: 0;
}
.source-pane textarea {
    flex: 1;
    resize: none;
    background: #0f0f0f;
    color: #e5e5e5;
    border: 0;
    padding: 1rem;
    font-family: var(--font-ptSans-mono, ui-monospace, monospace);
    font-size: 13px;
    line-height: 1.5;
}
.prompt-bar {
    display: flex;
    gap: 0.5rem;
    padding: 0.6rem;
    border-top: 1px solid var(--panel-border);
}
.prompt-bar input, .prompt-bar select {
    background: #171717;
    color: var(--fg);
    border: 1px solid var(--panel-border);
    border-radius: 8px;
    padding: 0.4rem 0.6rem;
}
.prompt-bar input { flex: 1; }

.preview-pane {
    display: flex;
    justify-content: center;
    background: #171717;
    min-height: 0;
}
.preview-pane iframe {
    width: 100%;
    height: 100%;
    border: 0;
    background: #fff;
    transition: width 200ms ease;
}
.preview-pane iframe.mobile {
    width: 375px;
    margin: 1rem 0;
    border-radius: 24px;
}

.btn {
    display: inline-flex;
    align-items: center;
    gap: 0.35rem;
    border-radius: 9999px;
    padding: 0.4rem 0.9rem;
    font-size: 0.85rem;
    border: 1px solid var(--panel-border);
    background: #171717;
    color: var(--fg);
    cursor: pointer;
}
.btn.primary { background: var(--accent); border-color: var(--accent); }
.btn.black { background: #0a0a0a; color: #fff; width: 100%; justify-content: center; }
.btn:disabled { opacity: 0.6; cursor: progress; }

.user-badge {
    font-size: 0.75rem;
    color: var(--muted);
    border: 1px solid var(--panel-border);
    border-radius: 9999px;
    padding: 0.2rem 0.6rem;
}
.pro-badge {
    font-size: 0.65rem;
    font-weight: 700;
    background: linear-gradient(90deg, #ec4899, #8b5cf6);
    border-radius: 4px;
    padding: 0.05rem 0.35rem;
}

.device-toggle {
    display: inline-flex;
    border-radius: 9999px;
    background: #171717;
    padding: 2px;
}
.device-toggle button {
    border: 0;
    background: transparent;
    color: var(--muted);
    border-radius: 9999px;
    padding: 0.25rem 0.6rem;
    cursor: pointer;
}
.device-toggle button.active { background: #fff; color: #000; }

.dialog-overlay {
    position: fixed;
    inset: 0;
    display: none;
    align-items: center;
    justify-content: center;
    background: rgba(0, 0, 0, 0.6);
    z-index: 50;
}
.dialog-overlay.active { display: flex; }
.dialog {
    width: min(28rem, 92vw);
    border-radius: 24px;
    overflow: hidden;
    background: var(--dialog-bg);
    color: var(--dialog-fg);
    text-align: center;
}
.dialog header {
    background: #fafafa;
    border-bottom: 1px solid #e5e5e5;
    padding: 1.5rem;
}
.dialog header .title { font-size: 1.35rem; font-weight: 600; }
.dialog header .description { color: var(--dialog-muted); margin-top: 0.35rem; }
.dialog main { padding: 1.5rem 2rem 2rem; display: grid; gap: 1rem; }
.dialog label { font-size: 0.85rem; color: #404040; display: block; margin-bottom: 0.4rem; }
.dialog input {
    width: 100%;
    border: 1px solid #d4d4d4;
    border-radius: 8px;
    padding: 0.5rem 0.7rem;
    color: #262626;
}
.dialog ul { text-align: left; display: grid; gap: 0.4rem; padding-left: 1.2rem; }

.toasts {
    position: fixed;
    bottom: 1rem;
    left: 50%;
    transform: translateX(-50%);
    display: grid;
    gap: 0.5rem;
    z-index: 60;
}
.toast {
    border-radius: 8px;
    padding: 0.6rem 1rem;
    color: #fff;
    font-size: 0.85rem;
}
.toast.success { background: var(--success); }
.toast.error { background: var(--danger); }
.toast.info { background: var(--info); }

[hidden] { display: none !important; }
.history-panel {
    display: none;
    position: fixed;
    bottom: 3.5rem;
    left: 1rem;
    max-height: 50vh;
    overflow-y: auto;
    background: var(--panel);
    border: 1px solid var(--panel-border);
    border-radius: 8px;
    z-index: 40;
}
.history-panel.active { display: grid; }
.history-entry {
    display: flex;
    justify-content: space-between;
    gap: 1rem;
    padding: 0.5rem 0.8rem;
    background: none;
    border: none;
    color: inherit;
    text-align: left;
    cursor: pointer;
}
.history-entry:hover { background: var(--panel-border); }
.history-entry time { opacity: 0.6; font-size: 0.75rem; }
"#;
