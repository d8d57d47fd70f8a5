//! Navigation-handler injection.
//!
//! Generated pages link to sections, pages that don't exist, and external
//! sites. Inside the preview iframe any real navigation either breaks the
//! preview or loops the builder into itself, so every page gets a delegated
//! click handler that turns links into in-page scrolling or explicit no-ops.

use super::insert_before_closing;

/// Attribute carried by the injected script tag.
pub const NAVIGATION_MARKER: &str = "data-studio-navigation";

/// The injected script. Rule order and section lookup mirror
/// `intent::classify` and `click::find_section`.
pub const NAVIGATION_SCRIPT: &str = r#"
    <script data-studio-navigation>
      document.addEventListener('DOMContentLoaded', function() {
        var INTERNAL_PAGES = ['features', 'pricing', 'about', 'contact', 'services', 'portfolio', 'team', 'blog'];

        function scrollToElement(el) {
          el.scrollIntoView({ behavior: 'smooth', block: 'start' });
        }

        function decodeFragment(fragment) {
          try {
            return decodeURIComponent(fragment);
          } catch (err) {
            return fragment;
          }
        }

        function firstMatching(selector, test) {
          var nodes = document.querySelectorAll(selector);
          for (var i = 0; i < nodes.length; i++) {
            if (test(nodes[i])) return nodes[i];
          }
          return null;
        }

        function findSection(key) {
          if (!key) return null;
          return document.getElementById(key) ||
            firstMatching('[data-section]', function(el) { return el.getAttribute('data-section') === key; }) ||
            firstMatching('section[id]', function(el) { return el.id.indexOf(key) !== -1; }) ||
            firstMatching('div[id]', function(el) { return el.id.indexOf(key) !== -1; }) ||
            firstMatching('section, [class*="section"], .container, main > *', function(el) {
              var headings = el.querySelectorAll('h1, h2, h3');
              for (var i = 0; i < headings.length; i++) {
                if (headings[i].textContent.toLowerCase().indexOf(key) !== -1) return true;
              }
              return false;
            });
        }

        document.addEventListener('click', function(e) {
          var link = e.target && e.target.closest ? e.target.closest('a') : null;
          if (!link) return;

          var href = link.getAttribute('href');
          if (!href) return;

          if (href.startsWith('#')) {
            e.preventDefault();
            var anchorTarget = document.getElementById(decodeFragment(href.slice(1)));
            if (anchorTarget) scrollToElement(anchorTarget);
            return;
          }

          var cleanHref = href.replace(/^\/+/, '').toLowerCase();
          if (INTERNAL_PAGES.indexOf(cleanHref) !== -1 || href.startsWith('/')) {
            e.preventDefault();
            var section = findSection(cleanHref);
            if (section) {
              scrollToElement(section);
            } else {
              window.scrollTo({ top: 0, behavior: 'smooth' });
            }
            return;
          }

          if (href.indexOf('http') !== -1 || href.indexOf('www.') !== -1) {
            e.preventDefault();
            alert('External link clicked: ' + href + '\n\nNote: External links are disabled in this preview.');
            return;
          }

          if (href.startsWith('mailto:') || href.startsWith('tel:')) {
            return;
          }

          e.preventDefault();
        });
      });
    </script>
  "#;

/// Inject the navigation script before the closing body tag, falling back to
/// the closing html tag and then to the end of the document.
///
/// Documents that already carry the exact injected block are returned
/// unchanged. The marker attribute alone proves nothing: page authors can
/// write it too.
pub fn inject_navigation_handler(html: &str) -> String {
    if html.contains(NAVIGATION_SCRIPT) {
        return html.to_string();
    }
    insert_before_closing(html, NAVIGATION_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::intent::{HREF_CASES, INTERNAL_PAGES};

    fn script_count(html: &str) -> usize {
        html.to_ascii_lowercase().matches("<script").count()
    }

    #[test]
    fn test_script_inserted_before_body_close() {
        let html = "<!DOCTYPE html><html><body><h1>Hi</h1></body></html>";
        let out = inject_navigation_handler(html);
        let at = html.find("</body>").unwrap();
        let expected = format!("{}{}\n{}", &html[..at], NAVIGATION_SCRIPT, &html[at..]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_uppercase_body_tag_is_an_anchor() {
        let out = inject_navigation_handler("<BODY>x</BODY>");
        assert!(out.ends_with("\n</BODY>"));
        assert!(out.starts_with("<BODY>x"));
    }

    #[test]
    fn test_falls_back_to_html_close() {
        let html = "<html><h1>No body</h1></html>";
        let out = inject_navigation_handler(html);
        assert!(out.starts_with("<html><h1>No body</h1>"));
        assert!(out.ends_with("\n</html>"));
        assert_eq!(script_count(&out), script_count(html) + 1);
    }

    #[test]
    fn test_fragment_without_anchor_gets_script_appended() {
        let html = "<div><script>var x = 1;</script>partial";
        let out = inject_navigation_handler(html);
        assert!(out.starts_with(html));
        assert_eq!(&out[html.len()..], NAVIGATION_SCRIPT);
        assert_eq!(script_count(&out), script_count(html) + 1);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(inject_navigation_handler(""), NAVIGATION_SCRIPT);
    }

    #[test]
    fn test_rewriting_twice_is_a_no_op() {
        let once = inject_navigation_handler("<html><body><a href=\"#a\">a</a></body></html>");
        let twice = inject_navigation_handler(&once);
        assert_eq!(once, twice);
        assert_eq!(script_count(&twice), 1);
    }

    #[test]
    fn test_author_marker_does_not_suppress_injection() {
        let html = r#"<html><body><a href="https://evil.example" data-studio-navigation>go</a></body></html>"#;
        let out = inject_navigation_handler(html);
        assert_ne!(out, html);
        assert_eq!(script_count(&out), 1);
        let at = html.find("</body>").unwrap();
        assert_eq!(out, format!("{}{}\n{}", &html[..at], NAVIGATION_SCRIPT, &html[at..]));

        let text_only = "<body><p>data-studio-navigation</p></body>";
        assert!(inject_navigation_handler(text_only).contains(NAVIGATION_SCRIPT));
    }

    #[test]
    fn test_script_has_no_closing_anchor_tags() {
        let lower = NAVIGATION_SCRIPT.to_ascii_lowercase();
        assert!(!lower.contains("</body>"));
        assert!(!lower.contains("</html>"));
        assert_eq!(script_count(NAVIGATION_SCRIPT), 1);
    }

    #[test]
    fn test_script_keyword_list_matches_classifier() {
        for keyword in INTERNAL_PAGES {
            assert!(NAVIGATION_SCRIPT.contains(&format!("'{}'", keyword)));
        }
        assert!(NAVIGATION_SCRIPT.contains(NAVIGATION_MARKER));
    }

    fn position(snippet: &str) -> usize {
        NAVIGATION_SCRIPT
            .find(snippet)
            .unwrap_or_else(|| panic!("script lacks {}", snippet))
    }

    #[test]
    fn test_script_branches_follow_classifier_order() {
        let branch = |kind: &str| match kind {
            "hash" => "href.startsWith('#')",
            "internal_page" => "INTERNAL_PAGES.indexOf(cleanHref)",
            "external" => "href.indexOf('http')",
            "communication" => "href.startsWith('mailto:')",
            "unknown" => "e.preventDefault();\n        });",
            other => panic!("unknown kind {}", other),
        };
        let mut last = 0;
        for (href, kind) in HREF_CASES {
            let at = position(branch(*kind));
            assert!(at >= last, "{} ({}) is checked out of order", href, kind);
            last = at;
        }
    }

    #[test]
    fn test_script_section_lookup_order() {
        let steps = [
            "document.getElementById(key)",
            "'[data-section]'",
            "'section[id]'",
            "'div[id]'",
            "'section, [class*=\"section\"], .container, main > *'",
            "window.scrollTo({ top: 0",
        ];
        for pair in steps.windows(2) {
            assert!(position(pair[0]) < position(pair[1]), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_single_delegated_listener() {
        assert_eq!(NAVIGATION_SCRIPT.matches("addEventListener('click'").count(), 1);
        assert!(!NAVIGATION_SCRIPT.contains("a[href^=\"#\"]"));
    }
}
