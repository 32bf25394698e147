use url::Url;

/// Returns true if `candidate` points at the document viewer endpoint
///
/// Scheme, host, port and path must match; the query is ignored.
pub fn is_viewer_url(candidate: &Url, viewer: &Url) -> bool {
    candidate.scheme() == viewer.scheme()
        && candidate.host_str() == viewer.host_str()
        && candidate.port_or_known_default() == viewer.port_or_known_default()
        && candidate.path().trim_end_matches('/') == viewer.path().trim_end_matches('/')
}

/// Extracts the wrapped document URL from a viewer redirect
///
/// The target is the raw text of the `url` query parameter up to the next
/// `&`. It is percent-decoded but not form-decoded, so a `+` in the target
/// stays a `+`. Any parameters after it belong to the viewer and are
/// discarded.
///
/// # Examples
///
/// ```
/// use poster_harvest::url::unwrap_viewer_url;
/// use url::Url;
///
/// let viewer = Url::parse("https://docs.google.com/viewer?url=https://dol.gov/a.pdf&embedded=true").unwrap();
/// let target = unwrap_viewer_url(&viewer).unwrap();
/// assert_eq!(target.as_str(), "https://dol.gov/a.pdf");
/// ```
pub fn unwrap_viewer_url(viewer: &Url) -> Option<Url> {
    let raw = viewer
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("url="))?;
    let target = urlencoding::decode(raw.trim()).ok()?;
    Url::parse(&target).ok()
}
