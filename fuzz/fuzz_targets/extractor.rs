#![no_main]

use libfuzzer_sys::fuzz_target;

use tracklist::extractor::extract_tracks;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);

    // Arbitrary markup may fail the page, but must never panic or yield an
    // untitled record.
    if let Ok(tracks) = extract_tracks(&html) {
        assert!(tracks.iter().all(|t| !t.title.is_empty()));
    }
});
