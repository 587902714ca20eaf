pub mod assembler;
pub mod errors;
pub mod fields;
pub mod locator;
pub mod model;

#[cfg(test)]
mod tests;

pub use errors::ExtractError;
pub use model::{Track, TrackFields};

use scraper::Html;

/// Turn one listing page into its usable tracks, in page order.
pub fn extract_tracks(html: &str) -> Result<Vec<Track>, ExtractError> {
    let document = Html::parse_document(html);
    let containers = locator::locate(&document)?;

    Ok(containers.iter().filter_map(assembler::assemble).collect())
}
