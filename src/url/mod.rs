//! URL handling module for Poster-Harvest
//!
//! This module provides filename derivation, root-relative qualification,
//! page-relative link resolution, and document-viewer redirect unwrapping.

mod filename;
mod viewer;

pub use filename::filename_from_url;
pub use viewer::{is_viewer_url, unwrap_viewer_url};

use url::Url;

/// Returns true for paths like `/embed/a.pdf`, but not for `//host/a.pdf`
pub fn is_root_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// Qualifies a root-relative path against the site origin
///
/// # Examples
///
/// ```
/// use poster_harvest::url::qualify_root_relative;
/// use url::Url;
///
/// let base = Url::parse("https://www.laborposters.org").unwrap();
/// let url = qualify_root_relative("/embed/abc.pdf", &base).unwrap();
/// assert_eq!(url.as_str(), "https://www.laborposters.org/embed/abc.pdf");
/// ```
pub fn qualify_root_relative(path: &str, base: &Url) -> Result<Url, url::ParseError> {
    base.join(path)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}
