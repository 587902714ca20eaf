use thiserror::Error;

use crate::{extractor::ExtractError, fetcher::FetchError};

/// Why a listing page produced no result at all.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("extraction task failed: {0}")]
    Task(String),
}
