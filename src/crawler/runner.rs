use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log2::*;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use super::fetch::Fetcher;
use super::walk::Crawler;

/// Crawls every seed with one shared crawler and returns the folders of the seeds
/// that were archived, in seed order.
///
/// The stop flag is only looked at between seeds. With `parallel` every seed runs
/// as its own task, otherwise seeds run one after another with `seed_delay_ms` between them.
pub async fn archive_seeds<F>(crawler: Arc<Crawler<F>>, seeds: &[String], parallel: bool) -> Result<Vec<PathBuf>>
where
    F: Fetcher + 'static,
{
    if parallel {
        archive_parallel(crawler, seeds).await
    } else {
        Ok(archive_sequential(&crawler, seeds).await)
    }
}

async fn archive_sequential<F: Fetcher>(crawler: &Crawler<F>, seeds: &[String]) -> Vec<PathBuf> {
    let delay = crawler.config().seed_delay_ms;
    let mut folders = Vec::new();

    for seed in seeds {
        if crawler.stop_requested() {
            info!("Auto-archive stopped before {}", seed);
            break;
        }
        if let Some(folder) = crawler.crawl(seed).await {
            folders.push(folder);
        }
        if delay > 0 {
            sleep(Duration::from_millis(delay)).await;
        }
    }

    info!("Auto-archive finished");
    folders
}

async fn archive_parallel<F>(crawler: Arc<Crawler<F>>, seeds: &[String]) -> Result<Vec<PathBuf>>
where
    F: Fetcher + 'static,
{
    let mut handles: Vec<JoinHandle<Option<PathBuf>>> = Vec::new();

    for (worker_id, seed) in seeds.iter().enumerate() {
        if crawler.stop_requested() {
            info!("Auto-archive stopped before {}", seed);
            break;
        }
        let crawler = Arc::clone(&crawler);
        let seed = seed.clone();
        handles.push(tokio::spawn(async move {
            info!("Worker {} started on {}", worker_id, seed);
            let folder = crawler.crawl(&seed).await;
            info!("Worker {} finished", worker_id);
            folder
        }));
    }

    let mut folders = Vec::new();
    for handle in handles {
        if let Some(folder) = handle.await? {
            folders.push(folder);
        }
    }

    info!("Auto-archive finished");
    Ok(folders)
}
