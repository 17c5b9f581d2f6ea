use std::future::Future;
use std::time::Duration;

use log2::debug;
use reqwest::Client;
use url::Url;

use super::config::CrawlerConfig;
use super::error::FetchError;

/// Raw answer of a GET request. Any status is a valid answer here,
/// callers decide what counts as success.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Only status 200 is accepted, everything else becomes [`FetchError::Status`]
    pub fn into_body(self, url: &Url) -> Result<Vec<u8>, FetchError> {
        if self.status == 200 {
            Ok(self.body)
        } else {
            Err(FetchError::Status {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Seam between the crawler and the network
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Plain GET with a fixed user agent. No retries, no cookies,
/// redirects follow the reqwest defaults.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .build()
            .map_err(|e| FetchError::Transport {
                url: config.base_url.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url.clone()).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?.to_vec();
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchedPage { status, body })
    }
}
