use url::Url;

/// Returns the last non-empty path segment of a URL
///
/// Query strings and fragments are not part of the result, so
/// `https://site/a/poster.pdf?v=2` yields `poster.pdf`.
pub fn filename_from_url(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .map(str::to_string)
}
