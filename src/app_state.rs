use std::sync::Arc;

use crate::scrape::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub homepage_url: Arc<str>,
}

impl AppState {
    pub fn new(catalog: CatalogService, homepage_url: &str) -> Self {
        Self {
            catalog: Arc::new(catalog),
            homepage_url: Arc::from(homepage_url),
        }
    }
}
