//! Read-only view over an archive written by the crawler.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log2::info;
use scraper::Html;

use crate::crawler::{IMAGES_DIR, PAGE_FILE};

const IMAGE_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

pub struct ArchiveLibrary {
    base_dir: PathBuf,
}

impl ArchiveLibrary {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Archived page folders whose name contains `query`, ignoring case
    pub fn search(&self, query: &str) -> Result<Vec<PathBuf>> {
        if !self.base_dir.is_dir() {
            return Ok(Vec::new());
        }
        let query = query.to_lowercase();
        let entries = std::fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to list {}", self.base_dir.display()))?;

        let mut results = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let matches = path
                .file_name()
                .map(|name| name.to_string_lossy().to_lowercase().contains(&query))
                .unwrap_or(false);
            if path.is_dir() && matches {
                results.push(path);
            }
        }
        results.sort();
        info!("Search for '{}' returned {} results.", query, results.len());
        Ok(results)
    }

    pub fn page_html(&self, folder: &Path) -> Result<String> {
        let html_file = folder.join(PAGE_FILE);
        std::fs::read_to_string(&html_file)
            .with_context(|| format!("Page HTML not found: {}", html_file.display()))
    }

    /// Text content of the page, one text node per line
    pub fn page_text(&self, folder: &Path) -> Result<String> {
        let html = self.page_html(folder)?;
        let document = Html::parse_document(&html);
        Ok(document.root_element().text().collect::<Vec<_>>().join("\n"))
    }

    pub fn images(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let images_dir = folder.join(IMAGES_DIR);
        if !images_dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut images = Vec::new();
        for entry in std::fs::read_dir(&images_dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }
}
