//! Editor state.
//!
//! The page owns a single [`EditorState`]; every change goes through a pure
//! transition that consumes the old state and returns the new one.

use crate::models::{Device, HtmlHistory};
use crate::preview::render_srcdoc;
use chrono::Utc;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Local-storage key used to carry the editor HTML across a login redirect.
pub const HTML_CONTENT_KEY: &str = "html_content";

/// Gap between clearing and reassigning the iframe on refresh.
pub const REFRESH_DELAY: Duration = Duration::from_millis(10);

pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>My app</title>
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta charset="utf-8">
    <script src="https://cdn.tailwindcss.com"></script>
  </head>
  <body class="flex justify-center items-center h-screen overflow-hidden bg-white font-sans text-center px-6">
    <div class="w-full">
      <img src="/public/bond-media-main-logo.svg" alt="Bond Media Studio" class="mx-auto w-auto z-10 relative" style="height: 400px; margin-top: -20px; margin-bottom: -100px;" />
      <h1 class="text-4xl lg:text-6xl font-bold font-sans relative z-20" style="margin-top: -120px;">
        <span class="text-2xl lg:text-4xl text-gray-400 block font-medium">We build bespoke premium websites,</span>
        Tell us your vision.
      </h1>
    </div>
    <script></script>
  </body>
</html>
"#;

// ============================================================================
// HTML Comparison
// ============================================================================

/// Compare two documents ignoring whitespace layout.
pub fn is_same_html(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

/// Whether `html` is still the untouched starter document.
pub fn is_default_html(html: &str) -> bool {
    is_same_html(html, DEFAULT_HTML)
}

// ============================================================================
// Editor State
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub html: String,
    pub device: Device,
    /// Newest first.
    pub history: Vec<HtmlHistory>,
    pub prompts: Vec<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            html: DEFAULT_HTML.to_string(),
            device: Device::Desktop,
            history: Vec::new(),
            prompts: Vec::new(),
        }
    }
}

impl EditorState {
    pub fn with_html(self, html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..self
        }
    }

    /// A finished generation: becomes the current HTML and the newest history entry.
    pub fn record_generation(mut self, html: impl Into<String>, prompt: impl Into<String>) -> Self {
        let html = html.into();
        let prompt = prompt.into();
        self.history.insert(
            0,
            HtmlHistory {
                html: html.clone(),
                created_at: Utc::now(),
                prompt: prompt.clone(),
            },
        );
        self.prompts.push(prompt);
        self.html = html;
        self
    }

    /// Bring back a history entry. Out-of-range indices leave the state unchanged.
    pub fn restore(self, index: usize) -> Self {
        match self.history.get(index).map(|entry| entry.html.clone()) {
            Some(html) => self.with_html(html),
            None => self,
        }
    }

    /// Back to the starter document. History is kept so the reset can be undone.
    pub fn reset(self) -> Self {
        Self {
            html: DEFAULT_HTML.to_string(),
            prompts: Vec::new(),
            ..self
        }
    }

    pub fn with_device(self, device: Device) -> Self {
        Self { device, ..self }
    }

    pub fn srcdoc(&self) -> String {
        render_srcdoc(&self.html)
    }
}

// ============================================================================
// Local Stash
// ============================================================================

/// The single local-storage slot written before a login redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalStash {
    html_content: Option<String>,
}

impl LocalStash {
    /// Store `html` unless it is still the starter document. Returns whether
    /// anything was written.
    pub fn stash_if_changed(&mut self, html: &str) -> bool {
        if is_default_html(html) {
            return false;
        }
        self.html_content = Some(html.to_string());
        true
    }

    pub fn get(&self) -> Option<&str> {
        self.html_content.as_deref()
    }

    pub fn take(&mut self) -> Option<String> {
        self.html_content.take()
    }
}

// ============================================================================
// Preview Frame
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FrameStep {
    Clear,
    Assign {
        #[serde(rename = "after_ms", serialize_with = "millis")]
        after: Duration,
        srcdoc: String,
    },
}

fn millis<S: Serializer>(after: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(after.as_millis() as u64)
}

/// The preview iframe. The host only ever writes a full document; refreshing
/// tears the content down and reassigns it rather than patching in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFrame {
    srcdoc: String,
}

impl PreviewFrame {
    pub fn load(&mut self, html: &str) {
        self.srcdoc = render_srcdoc(html);
    }

    pub fn srcdoc(&self) -> &str {
        &self.srcdoc
    }

    pub fn refresh_plan(&self) -> [FrameStep; 2] {
        [
            FrameStep::Clear,
            FrameStep::Assign {
                after: REFRESH_DELAY,
                srcdoc: self.srcdoc.clone(),
            },
        ]
    }
}

// ============================================================================
// Workspace
// ============================================================================

/// The authoritative editor plus the iframe it drives. Every change to the
/// HTML reloads the frame so the two never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub editor: EditorState,
    pub frame: PreviewFrame,
}

impl Default for Workspace {
    fn default() -> Self {
        let editor = EditorState::default();
        let mut frame = PreviewFrame::default();
        frame.load(&editor.html);
        Self { editor, frame }
    }
}

impl Workspace {
    /// New HTML for the preview. A document that differs from the current one
    /// is recorded in the history under `prompt`.
    pub fn update(&mut self, html: &str, prompt: &str) -> &str {
        if !is_same_html(html, &self.editor.html) {
            let editor = std::mem::take(&mut self.editor);
            self.editor = editor.record_generation(html, prompt);
        }
        self.frame.load(&self.editor.html);
        self.frame.srcdoc()
    }

    /// Returns false, leaving everything untouched, when `index` is out of range.
    pub fn restore(&mut self, index: usize) -> bool {
        if index >= self.editor.history.len() {
            return false;
        }
        let editor = std::mem::take(&mut self.editor);
        self.editor = editor.restore(index);
        self.frame.load(&self.editor.html);
        true
    }

    pub fn reset(&mut self) {
        let editor = std::mem::take(&mut self.editor);
        self.editor = editor.reset();
        self.frame.load(&self.editor.html);
    }

    pub fn set_device(&mut self, device: Device) {
        let editor = std::mem::take(&mut self.editor);
        self.editor = editor.with_device(device);
    }
}
