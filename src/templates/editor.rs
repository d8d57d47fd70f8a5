//! The builder page: source pane, prompt bar, live preview and the client
//! script that talks to the `/api` endpoints.

use crate::editor::{EditorState, HTML_CONTENT_KEY};
use crate::models::SessionIdentity;
use crate::providers::MODELS;

use super::components::{base_html, footer_toolbar, html_escape, preview_iframe, top_bar, SITE_TITLE};
use super::dialogs::{deploy_dialog, invite_friends, load_dialog, login_modals, pro_modal};

pub fn render_editor(editor: &EditorState, me: &SessionIdentity) -> String {
    let model_options: String = MODELS
        .iter()
        .map(|model| {
            format!(
                r#"<option value="{}">{}</option>"#,
                html_escape(model.value),
                html_escape(model.label)
            )
        })
        .collect();

    let content = format!(
        r#"<div class="studio">
            {top_bar}
            <div class="workspace">
                <div class="source-pane">
                    <textarea id="source" spellcheck="false">{source}</textarea>
                    <div class="prompt-bar">
                        <input type="text" id="prompt" placeholder="Describe the website you want...">
                        <select id="model" onchange="showRoute()">{model_options}</select>
                        <span class="route-info" id="route-info"></span>
                        <button class="btn primary" onclick="updatePreview()">Preview</button>
                    </div>
                </div>
                {preview}
            </div>
            {footer}
        </div>
        {deploy}
        {load}
        {pro}
        {logins}
        {invite}
        <div class="toasts" id="toasts"></div>
        <script>
        const HTML_CONTENT_KEY = '{stash_key}';
        {client}
        </script>"#,
        top_bar = top_bar(me),
        source = html_escape(&editor.html),
        preview = preview_iframe(editor),
        footer = footer_toolbar(editor, me),
        deploy = deploy_dialog(),
        load = load_dialog(),
        pro = pro_modal(),
        logins = login_modals(),
        invite = invite_friends(),
        stash_key = HTML_CONTENT_KEY,
        client = CLIENT_JS,
    );

    base_html(SITE_TITLE, &content)
}

const CLIENT_JS: &str = r#"
    const prompts = [];

    function toast(notice) {
        const el = document.createElement('div');
        el.className = 'toast ' + notice.level;
        el.textContent = notice.message;
        document.getElementById('toasts').appendChild(el);
        setTimeout(() => el.remove(), 4000);
    }

    function openDialog(id) {
        const el = document.getElementById(id);
        if (el) el.classList.add('active');
    }

    function closeDialog(id) {
        const el = document.getElementById(id);
        if (el) el.classList.remove('active');
    }

    function currentHtml() {
        return document.getElementById('source').value;
    }

    function applyStash(stash) {
        if (stash) localStorage.setItem(HTML_CONTENT_KEY, stash);
    }

    async function postJson(url, body) {
        const response = await fetch(url, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(body)
        });
        return response.json();
    }

    function handleOutcome(result, dialogId) {
        applyStash(result.stash);
        const outcome = result.outcome;
        switch (outcome.kind) {
            case 'login_required':
                closeDialog(dialogId);
                openDialog(result.login_dialog);
                break;
            case 'invalid':
                toast(outcome.notice);
                break;
            case 'busy':
                break;
            case 'dismissed':
                closeDialog(dialogId);
                break;
            case 'redirect':
                window.location.href = outcome.to;
                break;
            case 'imported':
                toast(outcome.notice);
                document.getElementById('source').value = outcome.project.html;
                closeDialog(dialogId);
                updatePreview();
                break;
            default:
                toast(outcome.notice);
                if (outcome.notice.level !== 'error') closeDialog(dialogId);
        }
    }

    function showFrame(frame) {
        document.getElementById('source').value = frame.html;
        document.getElementById('preview-frame').srcdoc = frame.srcdoc;
    }

    async function updatePreview() {
        const promptInput = document.getElementById('prompt');
        const prompt = promptInput.value;
        if (prompt) {
            prompts.push(prompt);
            promptInput.value = '';
        }
        const response = await fetch('/api/preview', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ html: currentHtml(), prompt: prompt })
        });
        document.getElementById('preview-frame').srcdoc = await response.text();
        loadHistory();
    }

    async function refreshPreview() {
        const iframe = document.getElementById('preview-frame');
        const steps = await (await fetch('/api/refresh')).json();
        for (const step of steps) {
            if (step.step === 'clear') {
                iframe.srcdoc = '';
            } else {
                setTimeout(() => { iframe.srcdoc = step.srcdoc; }, step.after_ms);
            }
        }
    }

    function setDevice(name) {
        const iframe = document.getElementById('preview-frame');
        iframe.className = name;
        document.querySelectorAll('.device-toggle button').forEach(b => {
            b.classList.toggle('active', b.dataset.device === name);
        });
        postJson('/api/device', { device: name }).catch(() => {});
    }

    async function resetEditor() {
        if (!confirm('Reset the editor? Your current page will be replaced by the starter page.')) return;
        const response = await fetch('/api/reset', { method: 'POST' });
        showFrame(await response.json());
        prompts.length = 0;
    }

    async function loadHistory() {
        const entries = await (await fetch('/api/history')).json();
        const panel = document.getElementById('history-panel');
        panel.replaceChildren(...entries.map((entry, index) => {
            const button = document.createElement('button');
            button.className = 'history-entry';
            button.onclick = () => restoreHistory(index);
            const label = document.createElement('span');
            label.textContent = entry.prompt || 'Manual edit';
            const time = document.createElement('time');
            time.textContent = new Date(entry.createdAt).toLocaleTimeString();
            button.append(label, time);
            return button;
        }));
        document.getElementById('history-count').textContent = entries.length;
        document.getElementById('history-toggle').hidden = entries.length === 0;
    }

    function toggleHistory() {
        document.getElementById('history-panel').classList.toggle('active');
    }

    async function restoreHistory(index) {
        const response = await postJson('/api/history/restore', { index: index }).catch(() => null);
        if (!response || !response.srcdoc) {
            toast({ level: 'error', message: 'That version is no longer available.' });
            return;
        }
        showFrame(response);
        document.getElementById('history-panel').classList.remove('active');
    }

    async function showRoute() {
        const model = document.getElementById('model').value;
        const info = document.getElementById('route-info');
        const response = await fetch('/api/models/route?model=' + encodeURIComponent(model));
        if (!response.ok) {
            info.textContent = '';
            return;
        }
        const route = await response.json();
        info.textContent = route.provider + ' · ' + route.maxTokens.toLocaleString() + ' tokens';
    }

    async function submitDeploy() {
        const button = document.getElementById('deploy-submit');
        button.disabled = true;
        try {
            const result = await postJson('/api/projects', {
                title: document.getElementById('deploy-title').value,
                html: currentHtml(),
                prompts: prompts
            });
            handleOutcome(result, 'deploy-dialog');
        } finally {
            button.disabled = false;
        }
    }

    function normalizeProjectUrl(input) {
        input.value = input.value.trim();
    }

    async function submitImport() {
        const button = document.getElementById('load-submit');
        if (button.disabled) return;
        button.disabled = true;
        button.textContent = 'Fetching your Project...';
        try {
            const result = await postJson('/api/projects/import', {
                url: document.getElementById('load-url').value
            });
            if (result.outcome.kind !== 'invalid') document.getElementById('load-url').value = '';
            handleOutcome(result, 'load-dialog');
        } finally {
            button.disabled = false;
            button.textContent = 'Import your Project';
        }
    }

    async function submitUpgrade() {
        const result = await postJson('/api/pro', { html: currentHtml() });
        handleOutcome(result, 'pro-dialog');
    }

    async function confirmLogin(dialogId) {
        const result = await postJson('/api/login', { html: currentHtml() });
        applyStash(result.stash);
        closeDialog(dialogId);
    }

    showRoute();

    (function restoreStash() {
        const stashed = localStorage.getItem(HTML_CONTENT_KEY);
        if (stashed) {
            document.getElementById('source').value = stashed;
            localStorage.removeItem(HTML_CONTENT_KEY);
            updatePreview();
        }
    })();
"#;
