//! Preview post-processing for generated pages.
//!
//! Generated HTML is untrusted and frequently malformed. Before it is handed
//! to the preview iframe as `srcdoc` it goes through two string-level passes:
//!
//! - `navigation` - injects the click-interception script
//! - `watermark` - injects the attribution footer
//!
//! `intent`, `dom` and `click` model what the injected script does once the
//! page is live, so the interception rules can be exercised without a browser.

pub mod click;
pub mod dom;
pub mod intent;
pub mod navigation;
pub mod watermark;

pub use click::{external_notice, find_section, simulate_click, ClickOutcome};
pub use dom::{Document, Element, NodeId};
pub use intent::{classify, NavigationIntent, INTERNAL_PAGES};
pub use navigation::{inject_navigation_handler, NAVIGATION_MARKER, NAVIGATION_SCRIPT};
pub use watermark::{attribution_fragment, inject_watermark, render_srcdoc, ATTRIBUTION_MARKER};

// ============================================================================
// Anchor Point Search
// ============================================================================

/// Insert `fragment` right before the last closing `</body>` tag, falling back
/// to the last `</html>` tag and finally to the end of the document.
///
/// Tag matching is ASCII case-insensitive. Every byte outside the inserted
/// fragment is preserved.
pub(crate) fn insert_before_closing(html: &str, fragment: &str) -> String {
    let anchor = rfind_ignore_ascii_case(html, "</body>")
        .or_else(|| rfind_ignore_ascii_case(html, "</html>"));

    match anchor {
        Some(at) => {
            let mut out = String::with_capacity(html.len() + fragment.len() + 1);
            out.push_str(&html[..at]);
            out.push_str(fragment);
            out.push('\n');
            out.push_str(&html[at..]);
            out
        }
        None => format!("{}{}", html, fragment),
    }
}

/// ASCII lowercasing keeps byte offsets stable, so offsets found in the
/// lowered copy are valid char boundaries in the original.
pub(crate) fn rfind_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .rfind(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_prefers_body_over_html() {
        let out = insert_before_closing("<html><body>x</body></html>", "<i></i>");
        assert_eq!(out, "<html><body>x<i></i>\n</body></html>");
    }

    #[test]
    fn test_insert_falls_back_to_html() {
        let out = insert_before_closing("<html>x</html>", "<i></i>");
        assert_eq!(out, "<html>x<i></i>\n</html>");
    }

    #[test]
    fn test_insert_appends_without_anchor() {
        let out = insert_before_closing("<p>loose</p>", "<i></i>");
        assert_eq!(out, "<p>loose</p><i></i>");
    }

    #[test]
    fn test_case_insensitive_search_keeps_offsets() {
        let html = "<BODY>é</BODY>";
        let at = rfind_ignore_ascii_case(html, "</body>").unwrap();
        assert_eq!(&html[at..], "</BODY>");
    }
}
