//! Link classification shared by the injected script and its Rust model.

use serde::Serialize;

/// Page-section keywords that are treated as in-page navigation even without
/// a leading slash.
pub const INTERNAL_PAGES: &[&str] = &[
    "features",
    "pricing",
    "about",
    "contact",
    "services",
    "portfolio",
    "team",
    "blog",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// `#fragment` link. Holds the fragment without the leading `#`.
    Hash(String),
    /// Root-relative path or known section keyword. Holds the cleaned keyword.
    InternalPage(String),
    /// Absolute URL or `www.` host. Holds the raw href.
    External(String),
    /// `mailto:` or `tel:` link.
    Communication,
    Unknown,
}

impl NavigationIntent {
    /// Whether the click handler calls `preventDefault` for this intent.
    pub fn prevents_default(&self) -> bool {
        !matches!(self, NavigationIntent::Communication)
    }
}

/// Strip every leading slash and lowercase.
pub fn clean_href(href: &str) -> String {
    href.trim_start_matches('/').to_lowercase()
}

/// Classify an `href` attribute value. Rules are tested in strict order and
/// the first match wins.
pub fn classify(href: &str) -> NavigationIntent {
    if let Some(fragment) = href.strip_prefix('#') {
        return NavigationIntent::Hash(fragment.to_string());
    }

    let cleaned = clean_href(href);
    if INTERNAL_PAGES.contains(&cleaned.as_str()) || href.starts_with('/') {
        return NavigationIntent::InternalPage(cleaned);
    }

    if href.contains("http") || href.contains("www.") {
        return NavigationIntent::External(href.to_string());
    }

    if href.starts_with("mailto:") || href.starts_with("tel:") {
        return NavigationIntent::Communication;
    }

    NavigationIntent::Unknown
}

/// Href cases in classifier precedence order, with the expected intent kind.
/// The click model and the script's branch order are checked against it too.
#[cfg(test)]
pub(crate) const HREF_CASES: &[(&str, &str)] = &[
    ("#pricing", "hash"),
    ("#", "hash"),
    ("/pricing", "internal_page"),
    ("Contact", "internal_page"),
    ("//www.example.com", "internal_page"),
    ("https://example.com", "external"),
    ("www.example.com", "external"),
    ("mailto:http@example.com", "external"),
    ("mailto:a@b.com", "communication"),
    ("tel:+441234", "communication"),
    ("next.html", "unknown"),
    ("javascript:void(0)", "unknown"),
];
