use tracing::{info, instrument, warn};

use crate::{
    extractor::{Track, extract_tracks},
    fetcher::PageSource,
    scrape::errors::ScrapeError,
};

/// Fetch one listing page and turn it into tracks.
///
/// A single attempt: transport failures come straight back to the caller.
/// An empty `Vec` means the page listed nothing.
#[instrument(skip(source))]
pub async fn run(source: &dyn PageSource, url: &str) -> Result<Vec<Track>, ScrapeError> {
    info!("scraping page");

    let page = source.fetch_page(url).await.map_err(|e| {
        warn!(error = %e, timeout = e.is_timeout(), "upstream fetch failed");
        ScrapeError::Fetch(e)
    })?;

    // scraper's DOM is not Send; parse off the async workers
    let tracks = tokio::task::spawn_blocking(move || extract_tracks(&page.body_utf8))
        .await
        .map_err(|e| ScrapeError::Task(e.to_string()))?
        .inspect_err(|e| warn!(error = %e, "page structure not recognised"))?;

    info!(count = tracks.len(), "extracted tracks");
    Ok(tracks)
}
