use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Default timeout for page and image requests in seconds
pub const LINK_REQUEST_TIMEOUT_SEC: u64 = 10;
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/";
pub const DEFAULT_BASE_DIR: &str = "wiki_archive";
pub const DEFAULT_USER_AGENT: &str = "WordSageBot/1.0";
pub const SUBLINK_LIMIT: usize = 5;
/// Per page
pub const IMAGE_LIMIT: usize = 5;

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Origin every href is resolved against
    pub base_url: Url,
    /// Root of the archive, one folder per page title lives below it
    pub base_dir: PathBuf,
    pub user_agent: String,
    /// Only hrefs starting with this prefix are followed
    pub article_prefix: String,
    /// Hrefs containing this character point outside the article namespace
    pub namespace_separator: char,
    pub sublink_limit: usize,
    pub image_limit: usize,
    /// `None` keeps recursion unbounded, only fan-out is capped
    pub max_depth: Option<usize>,
    pub request_timeout_sec: u64,
    /// Pause between sequential seeds
    pub seed_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            article_prefix: "/wiki/".to_string(),
            namespace_separator: ':',
            sublink_limit: SUBLINK_LIMIT,
            image_limit: IMAGE_LIMIT,
            max_depth: None,
            request_timeout_sec: LINK_REQUEST_TIMEOUT_SEC,
            seed_delay_ms: 1000,
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_sublink_limit(mut self, limit: usize) -> Self {
        self.sublink_limit = limit;
        self
    }

    pub fn with_image_limit(mut self, limit: usize) -> Self {
        self.image_limit = limit;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_request_timeout(mut self, timeout_sec: u64) -> Self {
        self.request_timeout_sec = timeout_sec;
        self
    }

    pub fn with_seed_delay(mut self, delay_ms: u64) -> Self {
        self.seed_delay_ms = delay_ms;
        self
    }

    /// A link is followed only if it is a plain article path:
    /// it starts with the article prefix and has no namespace separator.
    pub fn is_crawlable(&self, href: &str) -> bool {
        href.starts_with(&self.article_prefix) && !href.contains(self.namespace_separator)
    }

    /// Whether children of a page at `depth` may still be visited
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

pub type CrawlerConfigRef = Arc<CrawlerConfig>;
