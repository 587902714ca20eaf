use tracing::debug;

use crate::extractor::{
    fields::{self, LegendSlots},
    locator::ItemContainer,
    model::{Track, TrackFields},
};

/// Run every field extractor against its region of `container`.
pub fn extract_fields(container: &ItemContainer<'_>) -> TrackFields {
    let mut track = TrackFields {
        title: fields::title(container.info),
        creator: fields::creator(container.info),
        genres: fields::genres(container.info),
        cover_art_url: fields::cover_art_url(container.cover),
        download_url: fields::download_url(container.parent),
        ..Default::default()
    };

    if let Some(legend) = LegendSlots::find(container.parent) {
        track.published = fields::published(legend.date);
        track.rating = fields::rating(legend.rating);
        track.downloads = fields::count(legend.downloads, "downloads");
        track.plays = fields::count(legend.plays, "play_count");
        track.license = fields::license(legend.license);
    }

    track
}

/// Assemble one record, or `None` when it has no title.
pub fn assemble(container: &ItemContainer<'_>) -> Option<Track> {
    let fields = extract_fields(container);
    if !fields.is_usable() {
        debug!("dropping item without a title");
        return None;
    }
    Some(fields.into())
}
