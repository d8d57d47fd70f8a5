//! Rust model of the injected click handler.
//!
//! `simulate_click` walks the same decision chain as `NAVIGATION_SCRIPT`
//! against a parsed [`Document`], so interception behavior can be asserted
//! without a browser.

use super::dom::{Document, NodeId};
use super::intent::{classify, NavigationIntent};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Not intercepted; the browser's default action runs.
    Default,
    /// Default prevented and nothing else happens.
    Prevented,
    /// Default prevented, element smooth-scrolled into view.
    ScrollTo(NodeId),
    /// Default prevented, document smooth-scrolled to the top.
    ScrollToTop,
    /// Default prevented, blocking notice shown.
    Notice(String),
}

impl ClickOutcome {
    pub fn navigates_away(&self) -> bool {
        matches!(self, ClickOutcome::Default)
    }
}

/// Text of the blocking notice shown for external links.
pub fn external_notice(href: &str) -> String {
    format!(
        "External link clicked: {}\n\nNote: External links are disabled in this preview.",
        href
    )
}

/// Outcome of a click whose event target is `target`.
pub fn simulate_click(doc: &Document, target: NodeId) -> ClickOutcome {
    let Some(anchor) = doc.closest(target, "a") else {
        return ClickOutcome::Default;
    };
    let Some(href) = doc.element(anchor).and_then(|a| a.attr("href")) else {
        return ClickOutcome::Default;
    };

    match classify(href) {
        NavigationIntent::Hash(fragment) => {
            let id = urlencoding::decode(&fragment)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(fragment);
            doc.element_by_id(&id)
                .map_or(ClickOutcome::Prevented, ClickOutcome::ScrollTo)
        }
        NavigationIntent::InternalPage(key) => {
            find_section(doc, &key).map_or(ClickOutcome::ScrollToTop, ClickOutcome::ScrollTo)
        }
        NavigationIntent::External(href) => ClickOutcome::Notice(external_notice(&href)),
        NavigationIntent::Communication => ClickOutcome::Default,
        NavigationIntent::Unknown => ClickOutcome::Prevented,
    }
}

/// Resolve an internal-page keyword to a scroll target.
///
/// Order: exact id, `data-section`, `section[id*=key]`, `div[id*=key]`, then
/// the first section-like container holding an h1-h3 whose text contains the
/// keyword. An empty keyword (a bare `/`) resolves to nothing.
pub fn find_section(doc: &Document, key: &str) -> Option<NodeId> {
    if key.is_empty() {
        return None;
    }

    doc.element_by_id(key)
        .or_else(|| doc.find_element(|el| el.attr("data-section") == Some(key)))
        .or_else(|| {
            doc.find_element(|el| el.tag == "section" && el.id().is_some_and(|id| id.contains(key)))
        })
        .or_else(|| {
            doc.find_element(|el| el.tag == "div" && el.id().is_some_and(|id| id.contains(key)))
        })
        .or_else(|| heading_match(doc, key))
}

fn heading_match(doc: &Document, key: &str) -> Option<NodeId> {
    doc.elements()
        .map(|(id, _)| id)
        .filter(|&id| is_section_like(doc, id))
        .find(|&container| {
            doc.descendants(container).into_iter().any(|d| {
                doc.element(d).is_some_and(|el| el.is_heading())
                    && doc.text_content(d).to_lowercase().contains(key)
            })
        })
}

fn is_section_like(doc: &Document, id: NodeId) -> bool {
    let Some(el) = doc.element(id) else {
        return false;
    };
    let in_main = doc
        .parent(id)
        .and_then(|p| doc.element(p))
        .is_some_and(|parent| parent.tag == "main");

    el.tag == "section"
        || el.attr("class").is_some_and(|c| c.contains("section"))
        || el.has_class("container")
        || in_main
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_first_anchor(html: &str) -> (Document, ClickOutcome) {
        let doc = Document::parse(html);
        let anchor = doc.first_by_tag("a").expect("anchor");
        let outcome = simulate_click(&doc, anchor);
        (doc, outcome)
    }

    #[test]
    fn test_hash_link_scrolls_to_target() {
        let (doc, outcome) = click_first_anchor(
            r##"<body><a href="#section1">Go</a><div id="section1">Here</div></body>"##,
        );
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.element_by_id("section1").unwrap()));
        assert!(!outcome.navigates_away());
    }

    #[test]
    fn test_hash_link_without_target_is_swallowed() {
        let (_, outcome) = click_first_anchor(r##"<a href="#missing">Go</a>"##);
        assert_eq!(outcome, ClickOutcome::Prevented);
        let (_, outcome) = click_first_anchor(r##"<a href="#">Top</a>"##);
        assert_eq!(outcome, ClickOutcome::Prevented);
    }

    #[test]
    fn test_hash_fragment_is_percent_decoded() {
        let (doc, outcome) =
            click_first_anchor(r##"<a href="#our%20team">Team</a><section id="our team"></section>"##);
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.element_by_id("our team").unwrap()));
    }

    #[test]
    fn test_click_on_nested_element_resolves_anchor() {
        let doc = Document::parse(r##"<a href="#s"><span>icon</span></a><p id="s"></p>"##);
        let span = doc.first_by_tag("span").unwrap();
        assert_eq!(
            simulate_click(&doc, span),
            ClickOutcome::ScrollTo(doc.element_by_id("s").unwrap())
        );
    }

    #[test]
    fn test_click_outside_anchor_is_not_intercepted() {
        let doc = Document::parse("<p>text</p>");
        let p = doc.first_by_tag("p").unwrap();
        assert_eq!(simulate_click(&doc, p), ClickOutcome::Default);
    }

    #[test]
    fn test_anchor_without_href_is_not_intercepted() {
        let (_, outcome) = click_first_anchor("<a name=\"x\">x</a>");
        assert_eq!(outcome, ClickOutcome::Default);
    }

    #[test]
    fn test_internal_path_exact_id() {
        let (doc, outcome) =
            click_first_anchor(r#"<a href="/pricing">P</a><section id="pricing"></section>"#);
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.element_by_id("pricing").unwrap()));
    }

    #[test]
    fn test_internal_keyword_data_section() {
        let (doc, outcome) =
            click_first_anchor(r#"<a href="About">A</a><div data-section="about"></div>"#);
        let target = doc.find_element(|el| el.attr("data-section").is_some()).unwrap();
        assert_eq!(outcome, ClickOutcome::ScrollTo(target));
    }

    #[test]
    fn test_section_id_containment_beats_div() {
        let (doc, outcome) = click_first_anchor(
            r#"<a href="/team">T</a><div id="team-grid"></div><section id="our-team"></section>"#,
        );
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.element_by_id("our-team").unwrap()));
    }

    #[test]
    fn test_div_id_containment() {
        let (doc, outcome) =
            click_first_anchor(r#"<a href="/blog">B</a><div id="blog-posts"></div>"#);
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.element_by_id("blog-posts").unwrap()));
    }

    #[test]
    fn test_heading_heuristic_scrolls_container() {
        let (doc, outcome) = click_first_anchor(
            r#"<a href="/services">S</a>
               <div class="page-section"><h2>Who we are</h2></div>
               <div class="container"><h2>Our Services</h2></div>"#,
        );
        let container = doc.find_element(|el| el.has_class("container")).unwrap();
        assert_eq!(outcome, ClickOutcome::ScrollTo(container));
    }

    #[test]
    fn test_heading_heuristic_direct_child_of_main() {
        let (doc, outcome) = click_first_anchor(
            r#"<a href="/portfolio">P</a><main><article><h3>Portfolio highlights</h3></article></main>"#,
        );
        assert_eq!(outcome, ClickOutcome::ScrollTo(doc.first_by_tag("article").unwrap()));
    }

    #[test]
    fn test_unresolved_internal_link_scrolls_to_top() {
        let (_, outcome) = click_first_anchor(r#"<a href="/pricing">P</a><section><h2>Hello</h2></section>"#);
        assert_eq!(outcome, ClickOutcome::ScrollToTop);
    }

    #[test]
    fn test_root_link_scrolls_to_top() {
        let (_, outcome) = click_first_anchor(r#"<a href="/">Home</a><section id="x"><h1>Home</h1></section>"#);
        assert_eq!(outcome, ClickOutcome::ScrollToTop);
    }

    #[test]
    fn test_external_link_shows_notice_with_href() {
        let (_, outcome) = click_first_anchor(r#"<a href="https://example.com">Ext</a>"#);
        match outcome {
            ClickOutcome::Notice(message) => {
                assert!(message.contains("https://example.com"));
                assert!(message.contains("disabled"));
            }
            other => panic!("expected notice, got {:?}", other),
        }
    }

    #[test]
    fn test_mailto_and_tel_are_not_intercepted() {
        let (_, outcome) = click_first_anchor(r#"<a href="mailto:a@b.com">Mail</a>"#);
        assert_eq!(outcome, ClickOutcome::Default);
        let (_, outcome) = click_first_anchor(r#"<a href="tel:123">Call</a>"#);
        assert_eq!(outcome, ClickOutcome::Default);
    }

    #[test]
    fn test_href_table_outcomes() {
        for (href, kind) in crate::preview::intent::HREF_CASES {
            let (_, outcome) = click_first_anchor(&format!(r#"<body><a href="{}">x</a></body>"#, href));
            let expected = match *kind {
                "hash" | "unknown" => ClickOutcome::Prevented,
                "internal_page" => ClickOutcome::ScrollToTop,
                "external" => ClickOutcome::Notice(external_notice(href)),
                "communication" => ClickOutcome::Default,
                other => panic!("unknown kind {}", other),
            };
            assert_eq!(outcome, expected, "{}", href);
        }
    }

    #[test]
    fn test_heading_heuristic_follows_browser_tree() {
        let (doc, outcome) = click_first_anchor(
            r#"<a href="/pricing">P</a><main><p>Intro<div class="x"><h2>Pricing</h2></div></main>"#,
        );
        let div = doc.find_element(|el| el.has_class("x")).unwrap();
        assert_eq!(outcome, ClickOutcome::ScrollTo(div));
    }

    #[test]
    fn test_other_links_are_blocked() {
        let (_, outcome) = click_first_anchor(r#"<a href="next.html">Next</a>"#);
        assert_eq!(outcome, ClickOutcome::Prevented);
    }
}
