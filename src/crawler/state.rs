use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;
use url::Url;

/// URLs already handed out for crawling. Lives as long as the crawler, never persisted.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<Url>>,
}

impl VisitedSet {
    /// Check-and-insert in one critical section.
    /// Returns `true` for exactly one caller per URL, that caller owns the fetch.
    pub async fn claim(&self, url: &Url) -> bool {
        self.urls.lock().await.insert(url.clone())
    }

    pub async fn contains(&self, url: &Url) -> bool {
        self.urls.lock().await.contains(url)
    }

    pub async fn len(&self) -> usize {
        self.urls.lock().await.len()
    }
}

/// Current state of the crawler
#[derive(Debug, Default)]
pub struct CrawlerState {
    /// Set of visited URLs to prevent refetching
    pub visited: VisitedSet,
    pub pages_archived: AtomicUsize,
    pub pages_failed: AtomicUsize,
    pub images_downloaded: AtomicUsize,
    /// Checked between top-level seeds only
    pub stop_requested: AtomicBool,
}

impl CrawlerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CrawlStats {
        CrawlStats {
            pages_archived: self.pages_archived.load(Ordering::Relaxed),
            pages_failed: self.pages_failed.load(Ordering::Relaxed),
            images_downloaded: self.images_downloaded.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_archived: usize,
    pub pages_failed: usize,
    pub images_downloaded: usize,
}

pub type CrawlerStateRef = Arc<CrawlerState>;
