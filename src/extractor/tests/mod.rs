use chrono::{TimeZone, Utc};
use scraper::Html;
use std::fs;

use crate::extractor::{
    ExtractError, assembler, extract_tracks, locator,
    model::{Track, zero_timestamp},
};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn listing() -> Vec<Track> {
    extract_tracks(&fixture("listing.html")).expect("listing should extract")
}

#[test]
fn test_extract_complete_item() {
    let tracks = listing();
    let track = &tracks[0];

    assert_eq!(track.title, "Lune Rousse");
    assert_eq!(track.artist, "Dee Yan-Key");
    assert_eq!(track.track_url, "index.php?artist=dee-yan-key");
    assert_eq!(track.genres, vec!["Acoustic", "Folk"]);
    assert_eq!(
        track.cover_art_url,
        "http://www.auboutdufil.com/get_cover.php?id=1201"
    );
    assert_eq!(
        track.download_url,
        "http://www.auboutdufil.com/get.php?fla=https://archive.org/download/lune-rousse.mp3"
    );
    assert_eq!(track.license, "cc-byncnd");
    assert_eq!(track.downloads, 12345);
    assert_eq!(track.plays, 98765);
    assert_eq!(track.rating, 4.5);
    assert_eq!(
        track.published,
        Utc.with_ymd_and_hms(2017, 3, 14, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_untitled_item_is_dropped() {
    let tracks = listing();

    assert_eq!(tracks.len(), 3);
    assert!(tracks.iter().all(|t| !t.title.is_empty()));
    assert!(!tracks.iter().any(|t| t.artist == "Anonyme"));
}

#[test]
fn test_missing_rating_span_keeps_the_record() {
    let tracks = listing();
    let track = tracks
        .iter()
        .find(|t| t.title == "Sans Note")
        .expect("record without rating should be kept");

    assert_eq!(track.rating, 0.0);
    assert_eq!(track.artist, "Komiku");
    assert_eq!(track.genres, vec!["Electronic"]);
    assert!(track.download_url.ends_with("sans-note.mp3"));
}

#[test]
fn test_each_field_degrades_independently() {
    let tracks = listing();
    let track = tracks.iter().find(|t| t.title == "Été Indien").unwrap();

    assert_eq!(track.published, zero_timestamp());
    assert_eq!(track.rating, 0.0);
    assert_eq!(track.downloads, 7);
    assert_eq!(track.plays, 1500);
    assert_eq!(track.license, "");
    assert_eq!(track.artist, "");
    assert_eq!(track.track_url, "");
    assert_eq!(track.cover_art_url, "");
    assert_eq!(track.download_url, "");
    assert!(track.genres.is_empty());
}

#[test]
fn test_fields_distinguish_missing_from_zero() {
    let html = fixture("listing.html");
    let document = Html::parse_document(&html);
    let containers = locator::locate(&document).unwrap();

    let missing = assembler::extract_fields(&containers[3]);
    assert_eq!(missing.rating, None);
    assert_eq!(missing.published, None);
    assert_eq!(missing.downloads, Some(7));
}

#[test]
fn test_title_gating_ignores_other_fields() {
    let html = fixture("listing.html");
    let document = Html::parse_document(&html);
    let containers = locator::locate(&document).unwrap();

    let untitled = &containers[2];
    let fields = assembler::extract_fields(untitled);
    assert_eq!(fields.license.as_deref(), Some("cc0"));
    assert_eq!(fields.downloads, Some(10));
    assert!(assembler::assemble(untitled).is_none());
}

#[test]
fn test_empty_listing() {
    let tracks = extract_tracks(&fixture("empty.html")).unwrap();
    assert!(tracks.is_empty());
}

#[test]
fn test_drifted_markup_is_an_error() {
    match extract_tracks(&fixture("drifted.html")) {
        Err(ExtractError::Structure { candidates }) => assert_eq!(candidates, 2),
        other => panic!("expected structure error, got {other:?}"),
    }
}

#[test]
fn test_malformed_html() {
    let html = r#"<div class="audio-item"><div class="audio-wrapper"><div class="pure-u-1-3"><img src="c.jpg"><div class="pure-u-2-3"><b>Unclosed"#;

    // The parser closes the open tags, leaving the info region nested in the cover.
    let tracks = extract_tracks(html).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "Unclosed");
    assert_eq!(tracks[0].cover_art_url, "c.jpg");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = extract_tracks(&html);
        }

        #[test]
        fn test_extracted_tracks_are_titled(
            title in "[^<>&]{0,20}",
            rating in ".{0,8}",
            count in ".{0,8}",
        ) {
            let html = format!(
                r#"<div class="audio-item"><div class="audio-wrapper"><div class="pure-u-1-3"></div><div class="pure-u-2-3"><b>{title}</b></div></div><div class="legenddata"><span></span><span>{rating}</span><span>{count}</span><span></span><span></span></div></div>"#
            );
            if let Ok(tracks) = extract_tracks(&html) {
                for track in tracks {
                    prop_assert!(!track.title.is_empty());
                    prop_assert!((0.0..=5.0).contains(&track.rating));
                }
            }
        }
    }
}
