use url::Url;

/// Turns an image reference found on a page into an absolute URL.
///
/// References starting with `http` are returned untouched. Anything else is
/// joined against the page URL. When the base is not a usable URL the
/// reference comes back as-is.
pub fn resolve_url(base: &str, candidate: &str) -> String {
    if candidate.starts_with("http") {
        return candidate.to_string();
    }

    Url::parse(base)
        .and_then(|base| base.join(candidate))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| candidate.to_string())
}
