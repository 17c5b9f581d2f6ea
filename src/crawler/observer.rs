use url::Url;

use super::archive::ArchivedPage;
use super::error::CrawlError;

/// Hooks into the crawl. Every method defaults to doing nothing.
pub trait CrawlObserver: Send + Sync {
    fn page_archived(&self, _url: &Url, _page: &ArchivedPage) {}

    /// The URL was already claimed by this or another crawl
    fn page_skipped(&self, _url: &Url) {}

    fn page_failed(&self, _href: &str, _error: &CrawlError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}
