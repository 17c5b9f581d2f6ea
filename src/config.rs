use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::crawler::config::{
    CrawlerConfig, DEFAULT_BASE_DIR, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, IMAGE_LIMIT,
    LINK_REQUEST_TIMEOUT_SEC, SUBLINK_LIMIT,
};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// How an archived page is shown with `--view`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    Html,
    Text,
    Images,
}

/// All program arguments. `CrawlerConfig` only describes the crawler,
/// this also covers the seed driver and the archive queries.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Article paths or URLs to start from
    #[arg(long = "seed", default_values_t = [
        "/wiki/Mathematics".to_string(),
        "/wiki/Chemical_substance".to_string(),
        "/wiki/United_Kingdom".to_string(),
    ])]
    pub seeds: Vec<String>,
    /// Root folder of the archive
    #[arg(long, default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,
    /// Origin article links are resolved against
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
    /// Crawlable links followed per page
    #[arg(long, default_value_t = SUBLINK_LIMIT)]
    pub sublink_limit: usize,
    /// Images saved per page
    #[arg(long, default_value_t = IMAGE_LIMIT)]
    pub image_limit: usize,
    /// Stop following links below this depth (unbounded when absent)
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = LINK_REQUEST_TIMEOUT_SEC)]
    pub timeout: u64,
    /// Delay between seeds in milliseconds
    #[arg(long, default_value = "1000")]
    pub seed_delay: u64,
    /// Crawl all seeds concurrently with one shared crawler
    #[arg(long)]
    pub parallel: bool,
    /// List archived pages whose folder name contains this text instead of crawling
    #[arg(long)]
    pub search: Option<String>,
    /// Show an archived page folder instead of crawling
    #[arg(long)]
    pub view: Option<PathBuf>,
    #[arg(long, default_value = "html", value_enum)]
    pub mode: ViewMode,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.seeds.is_empty() {
            anyhow::bail!("at least one seed is required");
        }
        if self.timeout == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }
        if let Err(e) = Url::parse(&self.base_url) {
            anyhow::bail!("base_url {} is not a valid URL: {}", self.base_url, e);
        }
        Ok(())
    }

    pub fn crawler_config(&self) -> anyhow::Result<CrawlerConfig> {
        let base_url = Url::parse(&self.base_url)?;
        Ok(CrawlerConfig::new(base_url)
            .with_base_dir(&self.base_dir)
            .with_user_agent(&self.user_agent)
            .with_sublink_limit(self.sublink_limit)
            .with_image_limit(self.image_limit)
            .with_max_depth(self.max_depth)
            .with_request_timeout(self.timeout)
            .with_seed_delay(self.seed_delay))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}
