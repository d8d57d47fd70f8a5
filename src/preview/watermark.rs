//! Attribution footer composed into every previewed page.

use super::insert_before_closing;
use super::navigation::inject_navigation_handler;

pub const ATTRIBUTION_MARKER: &str = "data-studio-attribution";

const ATTRIBUTION_FRAGMENT: &str = r##"<p data-studio-attribution style="border-radius: 8px; text-align: center; font-size: 12px; color: #fff; margin-top: 16px;position: fixed; left: 8px; bottom: 8px; z-index: 10; background: rgba(0, 0, 0, 0.8); padding: 4px 8px;">Made with <img src="/public/bond-media-main-logo.svg" alt="Bond Media Studio Logo" style="width: 16px; height: 16px; vertical-align: middle;display:inline-block;margin-right:3px;filter:brightness(0) invert(1);"><a href="#" style="color: #fff;text-decoration: underline;" target="_blank" >Bond Media Studio</a></p>"##;

pub fn attribution_fragment() -> &'static str {
    ATTRIBUTION_FRAGMENT
}

/// Compose the attribution fragment into `html`, using the same anchor
/// fallback order as the navigation rewriter. Only the exact fragment counts
/// as already present.
pub fn inject_watermark(html: &str) -> String {
    if html.contains(ATTRIBUTION_FRAGMENT) {
        return html.to_string();
    }
    insert_before_closing(html, ATTRIBUTION_FRAGMENT)
}

/// Full preview pipeline: navigation rewriter, then watermark.
pub fn render_srcdoc(html: &str) -> String {
    inject_watermark(&inject_navigation_handler(html))
}
