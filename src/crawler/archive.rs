//! On-disk archive format:
//!
//! ```text
//! {base_dir}/
//!   {safe_title}/
//!     page.html
//!     images/
//!       img_{i}{ext}
//! ```
//!
//! `i` is the position of the `<img>` among all images of the page, not the
//! number of images saved so far. Failed downloads leave gaps in the numbering
//! and readers of the archive rely on that.

use std::path::{Path, PathBuf};

use log2::{info, warn};
use tokio::fs;
use url::Url;

use super::config::CrawlerConfig;
use super::error::{ArchiveError, FetchError};
use super::fetch::Fetcher;
use super::sanitize::{ImageSource, PageDocument};

pub const PAGE_FILE: &str = "page.html";
pub const IMAGES_DIR: &str = "images";

/// Result of archiving one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedPage {
    pub folder: PathBuf,
    pub images_saved: usize,
}

pub struct Archiver {
    base_dir: PathBuf,
    image_host: Url,
    image_limit: usize,
}

impl Archiver {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            image_host: config.base_url.clone(),
            image_limit: config.image_limit,
        }
    }

    pub fn folder_for(&self, title: &str) -> PathBuf {
        self.base_dir.join(safe_folder_name(title))
    }

    /// Writes `page.html` and up to `image_limit` images. Only failing to write
    /// the page itself is an error, images are best effort.
    pub async fn save<F: Fetcher>(
        &self,
        fetcher: &F,
        title: &str,
        page: &PageDocument,
    ) -> Result<ArchivedPage, ArchiveError> {
        let folder = self.folder_for(title);
        create_dir(&folder).await?;

        let html_file = folder.join(PAGE_FILE);
        fs::write(&html_file, page.markup.as_bytes())
            .await
            .map_err(|source| ArchiveError::Io { path: html_file.clone(), source })?;
        info!("Saved HTML for page: {}", title);

        let images_dir = folder.join(IMAGES_DIR);
        create_dir(&images_dir).await?;

        let mut images_saved = 0;
        for image in &page.images {
            if images_saved >= self.image_limit {
                break;
            }
            match self.save_image(fetcher, &images_dir, image).await {
                Ok(file_name) => {
                    images_saved += 1;
                    info!("Downloaded image: {} for page: {}", file_name, title);
                }
                Err(e) => warn!("Failed to download image {}: {}", image.src, e),
            }
        }

        Ok(ArchivedPage { folder, images_saved })
    }

    async fn save_image<F: Fetcher>(
        &self,
        fetcher: &F,
        images_dir: &Path,
        image: &ImageSource,
    ) -> Result<String, ImageError> {
        let url = resolve_image_url(&image.src, &self.image_host)?;
        let bytes = fetcher.fetch(&url).await?.into_body(&url)?;

        let file_name = format!("img_{}{}", image.index, extension_of(url.as_str()));
        let path = images_dir.join(&file_name);
        fs::write(&path, bytes)
            .await
            .map_err(|source| ArchiveError::Io { path: path.clone(), source })?;
        Ok(file_name)
    }
}

#[derive(Debug, thiserror::Error)]
enum ImageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

async fn create_dir(path: &Path) -> Result<(), ArchiveError> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| ArchiveError::Io { path: path.to_path_buf(), source })
}

/// Every character outside `[A-Za-z0-9_-]` becomes `_`.
/// Distinct titles may collide, the last writer wins.
pub fn safe_folder_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    if name.is_empty() { "_".to_string() } else { name }
}

/// `//host/path` gets `https:`, `/path` is taken relative to the host of `image_host`,
/// anything else is used unchanged.
pub fn resolve_image_url(src: &str, image_host: &Url) -> Result<Url, FetchError> {
    let absolute = if src.starts_with("//") {
        format!("https:{}", src)
    } else if src.starts_with('/') {
        format!("{}{}", image_host.origin().ascii_serialization(), src)
    } else {
        src.to_string()
    };

    Url::parse(&absolute).map_err(|source| FetchError::InvalidUrl { url: absolute, source })
}

/// Extension of the last path segment including the dot, with any query string cut off.
/// Leading dots of the segment do not start an extension.
pub fn extension_of(url: &str) -> &str {
    let last_segment = url.rsplit('/').next().unwrap_or_default();
    let stem_start = last_segment.len() - last_segment.trim_start_matches('.').len();
    let ext = match last_segment[stem_start..].rfind('.') {
        Some(dot) => &last_segment[stem_start + dot..],
        None => "",
    };
    ext.split('?').next().unwrap_or_default()
}
