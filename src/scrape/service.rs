use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::{
    cache::TtlCache,
    extractor::Track,
    fetcher::PageSource,
    request::FilterSet,
    scrape::{errors::ScrapeError, pipeline},
};

/// Cache-aside access to catalog listings.
///
/// Concurrent misses on the same key each run the pipeline; the last one to
/// finish wins the cache slot. Failures are never cached.
pub struct CatalogService {
    source: Arc<dyn PageSource>,
    cache: TtlCache<Vec<Track>>,
    base_url: Url,
}

impl CatalogService {
    pub fn new(source: Arc<dyn PageSource>, cache: TtlCache<Vec<Track>>, base_url: Url) -> Self {
        Self {
            source,
            cache,
            base_url,
        }
    }

    pub fn cache(&self) -> &TtlCache<Vec<Track>> {
        &self.cache
    }

    pub async fn tracks(&self, filters: &FilterSet) -> Result<Arc<Vec<Track>>, ScrapeError> {
        let key = filters.cache_key();

        if let Some(tracks) = self.cache.get(&key) {
            debug!(%key, "cache hit");
            return Ok(tracks);
        }

        debug!(%key, "cache miss");
        let url = filters.upstream_url(&self.base_url);
        let tracks = pipeline::run(self.source.as_ref(), url.as_str()).await?;
        Ok(self.cache.set(key, tracks))
    }
}
