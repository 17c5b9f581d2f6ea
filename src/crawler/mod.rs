pub mod archive;
pub mod config;
pub mod error;
pub mod fetch;
pub mod observer;
pub mod runner;
pub mod sanitize;
pub mod scrape;
pub mod state;
pub mod walk;


pub use archive::{ArchivedPage, Archiver, IMAGES_DIR, PAGE_FILE, safe_folder_name};
pub use config::{CrawlerConfig, CrawlerConfigRef, LINK_REQUEST_TIMEOUT_SEC};
pub use error::{ArchiveError, CrawlError, FetchError};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
pub use observer::{CrawlObserver, NoopObserver};
pub use runner::archive_seeds;
pub use sanitize::{PageDocument, Sanitizer};
pub use scrape::{construct_url, page_title};
pub use state::{CrawlStats, CrawlerState, CrawlerStateRef, VisitedSet};
pub use walk::{CrawlTask, Crawler};
