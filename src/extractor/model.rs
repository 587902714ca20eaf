use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One listed item as served to API clients.
///
/// Every key is always present; fields the page did not yield carry their
/// zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Link to the artist's page on the catalog.
    pub track_url: String,
    pub genres: Vec<String>,
    pub cover_art_url: String,
    pub download_url: String,
    /// License code as used by the catalog (e.g. `cc-byncnd`).
    pub license: String,
    pub downloads: u64,
    #[serde(rename = "play_count")]
    pub plays: u64,
    pub rating: f32,
    #[serde(rename = "published_date")]
    pub published: DateTime<Utc>,
}

/// Creator name and profile link, taken from the same hyperlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub name: String,
    pub profile_url: String,
}

/// Raw extraction output for one container.
///
/// `None` means the extractor could not find or decode its target, which is
/// different from a decoded zero (a track with 0 plays).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackFields {
    pub title: Option<String>,
    pub creator: Option<Creator>,
    pub genres: Vec<String>,
    pub cover_art_url: Option<String>,
    pub download_url: Option<String>,
    pub license: Option<String>,
    pub downloads: Option<u64>,
    pub plays: Option<u64>,
    pub rating: Option<f32>,
    pub published: Option<DateTime<Utc>>,
}

impl TrackFields {
    /// A record is only worth serving when it has a title.
    pub fn is_usable(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl From<TrackFields> for Track {
    fn from(fields: TrackFields) -> Self {
        let (artist, track_url) = fields
            .creator
            .map(|c| (c.name, c.profile_url))
            .unwrap_or_default();

        Self {
            title: fields.title.unwrap_or_default(),
            artist,
            track_url,
            genres: fields.genres,
            cover_art_url: fields.cover_art_url.unwrap_or_default(),
            download_url: fields.download_url.unwrap_or_default(),
            license: fields.license.unwrap_or_default(),
            downloads: fields.downloads.unwrap_or_default(),
            plays: fields.plays.unwrap_or_default(),
            rating: fields.rating.unwrap_or_default(),
            published: fields.published.unwrap_or_else(zero_timestamp),
        }
    }
}

/// `0001-01-01T00:00:00Z`, the "unknown" publication date on the wire.
pub fn zero_timestamp() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Collapse runs of whitespace (including no-break spaces) to single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
