//! HTML templates and styling for the builder.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants for the dark shell and dialogs
//! - `components` - Page shell, top bar, footer toolbar, preview iframe
//! - `dialogs` - Deploy, import, upgrade, login and invite dialogs
//! - `editor` - The builder page and its client script

mod components;
mod dialogs;
mod editor;
mod styles;

pub use components::{
    base_html, footer_toolbar, history_entries, html_escape, preview_iframe, top_bar, SITE_NAME, SITE_TITLE,
};
pub use dialogs::{deploy_dialog, invite_friends, load_dialog, login_modal, login_modals, pro_modal};
pub use editor::render_editor;
pub use styles::STYLE;
