use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Result;
use log2::*;
use url::Url;

use super::archive::{ArchivedPage, Archiver};
use super::config::{CrawlerConfig, CrawlerConfigRef};
use super::error::CrawlError;
use super::fetch::{Fetcher, HttpFetcher};
use super::observer::{CrawlObserver, NoopObserver};
use super::sanitize::Sanitizer;
use super::scrape::{construct_url, page_title};
use super::state::{CrawlStats, CrawlerState, CrawlerStateRef};

/// One pending visit: a raw href and the depth it was found at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub href: String,
    pub depth: usize,
}

/// Depth-first archiving crawler.
///
/// One instance may be shared by any number of concurrent `crawl` calls, they all
/// see the same visited set. A single `crawl` never runs anything in parallel.
pub struct Crawler<F> {
    config: CrawlerConfigRef,
    state: CrawlerStateRef,
    fetcher: F,
    sanitizer: Sanitizer,
    archiver: Archiver,
    observer: Arc<dyn CrawlObserver>,
}

impl Crawler<HttpFetcher> {
    pub fn with_http(config: CrawlerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::new(config, fetcher)
    }
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(config: CrawlerConfig, fetcher: F) -> Result<Self> {
        let archiver = Archiver::new(&config);
        Ok(Self {
            config: Arc::new(config),
            state: Arc::new(CrawlerState::new()),
            fetcher,
            sanitizer: Sanitizer::new()?,
            archiver,
            observer: Arc::new(NoopObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn state(&self) -> &CrawlerStateRef {
        &self.state
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn stats(&self) -> CrawlStats {
        self.state.stats()
    }

    /// Seed drivers stop before their next seed. A running `crawl` is not interrupted.
    pub fn request_stop(&self) {
        self.state.stop_requested.store(true, Ordering::SeqCst);
    }

    pub fn stop_requested(&self) -> bool {
        self.state.stop_requested.load(Ordering::SeqCst)
    }

    /// Archives `href` and everything reachable from it through crawlable links.
    /// Returns the folder of `href` itself, `None` if it was already visited or failed.
    pub async fn crawl(&self, href: &str) -> Option<PathBuf> {
        self.crawl_at(href, 0).await
    }

    pub async fn crawl_at(&self, href: &str, depth: usize) -> Option<PathBuf> {
        // Children are pushed in reverse so they pop in document order,
        // each subtree finishing before its next sibling starts.
        let mut pending = Vec::new();
        let folder = self.visit(href, depth, &mut pending).await;
        while let Some(task) = pending.pop() {
            self.visit(&task.href, task.depth, &mut pending).await;
        }
        folder
    }

    async fn visit(&self, href: &str, depth: usize, pending: &mut Vec<CrawlTask>) -> Option<PathBuf> {
        let url = match construct_url(href, &self.config.base_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Error crawling page {}: {}", href, e);
                self.observer.page_failed(href, &e);
                return None;
            }
        };

        // The lock is released before any network call
        if !self.state.visited.claim(&url).await {
            info!("Skipping already visited page: {}", url);
            self.observer.page_skipped(&url);
            return None;
        }

        info!("Crawling page: {} at depth {}", url, depth);
        match self.archive_page(&url).await {
            Ok((page, links)) => {
                self.state.pages_archived.fetch_add(1, Ordering::Relaxed);
                self.state.images_downloaded.fetch_add(page.images_saved, Ordering::Relaxed);
                self.observer.page_archived(&url, &page);

                let child_depth = depth + 1;
                if self.config.allows_depth(child_depth) {
                    pending.extend(
                        self.sublinks(&links)
                            .into_iter()
                            .rev()
                            .map(|href| CrawlTask { href, depth: child_depth }),
                    );
                } else {
                    debug!("Max depth reached at {}, not following its links", url);
                }
                Some(page.folder)
            }
            Err(e) => {
                warn!("Failed to crawl page {}: {}", url, e);
                self.state.pages_failed.fetch_add(1, Ordering::Relaxed);
                self.observer.page_failed(href, &e);
                None
            }
        }
    }

    async fn archive_page(&self, url: &Url) -> Result<(ArchivedPage, Vec<String>), CrawlError> {
        let body = self.fetcher.fetch(url).await?.into_body(url)?;
        let document = self.sanitizer.sanitize(&body);
        let title = page_title(url);
        let page = self.archiver.save(&self.fetcher, title, &document).await?;
        Ok((page, document.links))
    }

    /// First `sublink_limit` crawlable hrefs in document order.
    /// Links that are not crawlable never count toward the limit.
    pub fn sublinks(&self, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter(|href| self.config.is_crawlable(href))
            .take(self.config.sublink_limit)
            .cloned()
            .collect()
    }
}
