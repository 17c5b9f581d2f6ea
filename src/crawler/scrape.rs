use url::Url;

use super::error::CrawlError;

/// If `href` is a full URL, returns it as-is. Otherwise resolves it against `base_url`
/// the way a browser resolves a link. Query and fragment are kept.
pub fn construct_url(href: &str, base_url: &Url) -> Result<Url, CrawlError> {
    let resolved = match Url::parse(href) {
        Ok(parsed_url) if parsed_url.has_host() => Ok(parsed_url),
        _ => base_url.join(href),
    };

    resolved.map_err(|source| CrawlError::InvalidUrl {
        href: href.to_string(),
        base: base_url.to_string(),
        source,
    })
}

/// Title of a page is the last path segment of its URL, not the document `<title>`
pub fn page_title(url: &Url) -> &str {
    url.as_str().rsplit('/').next().unwrap_or_default()
}
