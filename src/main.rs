use log2::*;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

use WikiArchiver::config::{self, ViewMode};
use WikiArchiver::crawler::{self, Crawler};
use WikiArchiver::library::ArchiveLibrary;

/// Indicates start time of a project, lazily initialized
pub static START_TIME: once_cell::sync::Lazy<Instant> = once_cell::sync::Lazy::new(Instant::now);

#[tokio::main]
async fn main() -> Result<()> {
    let _ = *START_TIME;
    let cfg = config::Config::new();
    cfg.validate()?;
    let _log2 = stdout()
        .module(true) // include module name
        .module_with_line(true) // include line number from module
        .module_filter(|module| module.starts_with("WikiArchiver")) // include only modules having this pattern
        .compress(false) // compress output
        .level(cfg.log_level.to_string()) // level of logging (trace -
        .start();

    let library = ArchiveLibrary::new(&cfg.base_dir);

    if let Some(query) = &cfg.search {
        for folder in library.search(query)? {
            println!("{}", folder.display());
        }
        return Ok(());
    }

    if let Some(folder) = &cfg.view {
        info!("Loading page '{}' with mode: {:?}", folder.display(), cfg.mode);
        match cfg.mode {
            ViewMode::Html => println!("{}", library.page_html(folder)?),
            ViewMode::Text => println!("{}", library.page_text(folder)?),
            ViewMode::Images => {
                for image in library.images(folder)? {
                    println!("{}", image.display());
                }
            }
        }
        return Ok(());
    }

    std::fs::create_dir_all(&cfg.base_dir)
        .with_context(|| format!("Failed to create {}", cfg.base_dir.display()))?;

    let crawler = Arc::new(Crawler::with_http(cfg.crawler_config()?)?);

    let stopper = Arc::clone(&crawler);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Stop requested, finishing the current seed. Press Ctrl-C again to abort");
            stopper.request_stop();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    match crawler::archive_seeds(Arc::clone(&crawler), &cfg.seeds, cfg.parallel).await {
        Ok(folders) => {
            let stats = crawler.stats();
            info!(
                "Archived {} pages ({} failed), {} images in {:?}",
                stats.pages_archived,
                stats.pages_failed,
                stats.images_downloaded,
                START_TIME.elapsed()
            );
            for folder in folders {
                println!("{}", folder.display());
            }
        }
        Err(e) => {
            error!("Crawling failed: {}", e);
        }
    }

    Ok(())
}
