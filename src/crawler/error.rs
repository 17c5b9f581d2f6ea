use std::path::PathBuf;
use thiserror::Error;

/// Soft failures of a single request. None of these abort a crawl.
#[derive(Error, Debug)]
pub enum FetchError {
    /// DNS, timeout, refused or reset connection
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that stops one page from being archived
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("cannot resolve {href} against {base}: {source}")]
    InvalidUrl {
        href: String,
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}
