//! HTML queries over parsed pages
//!
//! This module wraps `scraper` in a small typed query surface:
//! - "first element matching a selector within a node"
//! - "first text node matching a predicate"
//! - attribute lookup
//!
//! Missing nodes are reported as [`QueryError::NotFound`] so callers decide
//! whether that is fatal or just means "try something else". It also holds
//! the fixed selector contracts for directory and index pages.

use crate::model::StateEntry;
use crate::url::resolve_link;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use thiserror::Error;
use url::Url;

/// Marker class found inside the state-list table body
pub const STATE_TABLE_MARKER: &str = ".sf-al";

/// Poster links on a state index page
pub const POSTER_LINK_SELECTOR: &str = ".tab-content .poster-name a";

/// Errors from HTML queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

/// Parses a CSS selector
pub fn selector(css: &str) -> Result<Selector, QueryError> {
    Selector::parse(css).map_err(|_| QueryError::InvalidSelector(css.to_string()))
}

/// Finds the first element matching `css` within `scope`
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, QueryError> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    found.ok_or_else(|| QueryError::NotFound(format!("element matching '{}'", css)))
}

/// Collects every element matching `css` within `scope`, in document order
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, QueryError> {
    let sel = selector(css)?;
    let found = scope.select(&sel).collect();
    Ok(found)
}

/// Finds the first text node satisfying `predicate` and returns its parent element
pub fn find_text_parent<'a, P>(document: &'a Html, predicate: P) -> Result<ElementRef<'a>, QueryError>
where
    P: Fn(&str) -> bool,
{
    document
        .tree
        .root()
        .descendants()
        .find(|node| matches!(node.value(), Node::Text(text) if predicate(&*text.text)))
        .and_then(|node| node.parent())
        .and_then(ElementRef::wrap)
        .ok_or_else(|| QueryError::NotFound("text node matching predicate".to_string()))
}

/// Reads an attribute from an element
pub fn attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str, QueryError> {
    element.value().attr(name).ok_or_else(|| {
        QueryError::NotFound(format!(
            "attribute '{}' on <{}>",
            name,
            element.value().name()
        ))
    })
}

/// Visible text of an element with whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts `(state name, index URL)` pairs from the directory page
///
/// The table body is the nearest `<tbody>` enclosing the
/// [`STATE_TABLE_MARKER`] element. Each row contributes its first anchor.
/// Rows without a usable anchor are skipped. Duplicate names keep the
/// first occurrence.
pub fn extract_state_entries(html: &str, page_url: &Url) -> Result<Vec<StateEntry>, QueryError> {
    let document = Html::parse_document(html);
    let marker = select_first(document.root_element(), STATE_TABLE_MARKER)?;
    let tbody = enclosing_table_body(marker)
        .ok_or_else(|| QueryError::NotFound("state table body".to_string()))?;

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for row in select_all(tbody, "tr")? {
        let Ok(anchor) = select_first(row, "a") else {
            tracing::debug!("Skipping directory row without a link");
            continue;
        };

        let name = element_text(anchor);
        let Some(index_url) = anchor.value().attr("href").and_then(|h| resolve_link(h, page_url))
        else {
            tracing::debug!("Skipping state '{}' without a usable href", name);
            continue;
        };

        if name.is_empty() {
            tracing::debug!("Skipping unnamed state link {}", index_url);
            continue;
        }

        if !seen.insert(name.clone()) {
            tracing::warn!("Duplicate state '{}' in directory, keeping the first", name);
            continue;
        }

        entries.push(StateEntry {
            name,
            index_url: index_url.to_string(),
        });
    }

    Ok(entries)
}

/// Nearest `<tbody>` ancestor, falling back to the marker's grandparent
fn enclosing_table_body(marker: ElementRef<'_>) -> Option<ElementRef<'_>> {
    marker
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tbody")
        .or_else(|| {
            marker
                .parent()
                .and_then(|p| p.parent())
                .and_then(ElementRef::wrap)
        })
}

/// Extracts poster page URLs from a state index page
///
/// An index page without posters yields an empty list. Repeated links are
/// returned once, in first-seen order.
pub fn extract_poster_links(html: &str, page_url: &Url) -> Result<Vec<String>, QueryError> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    let links = select_all(document.root_element(), POSTER_LINK_SELECTOR)?
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect();

    Ok(links)
}
