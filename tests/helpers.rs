#![allow(dead_code)]

use axum::Router;
use std::{sync::Arc, time::Duration};
use url::Url;

use tracklist::{
    app_state::AppState, cache::TtlCache, fetcher::HttpFetcher, scrape::CatalogService, server,
};

pub const HOMEPAGE: &str = "https://github.com/Shywim/auboutdufil-api";

pub fn fetcher() -> HttpFetcher {
    HttpFetcher::new(Duration::from_secs(2), Duration::from_secs(5)).expect("client should build")
}

/// The full router, talking to `upstream` (a mock server URI).
pub fn test_app(upstream: &str, ttl: Duration) -> Router {
    let base = Url::parse(&format!("{upstream}/index.php")).expect("valid mock url");
    let catalog = CatalogService::new(Arc::new(fetcher()), TtlCache::new(ttl), base);
    server::router(AppState::new(catalog, HOMEPAGE))
}

/// One catalog item in the markup the extractor understands.
pub fn item(title: &str, artist: &str, genres: &[&str], legend: &[&str]) -> String {
    let tags: String = genres.iter().map(|g| format!("<span>{g}</span>")).collect();
    let spans: String = legend.iter().map(|s| format!("<span>{s}</span>")).collect();
    format!(
        r#"<div class="audio-item pure-g">
  <div class="audio-wrapper pure-g">
    <div class="pure-u-1-3"><div class="cover"><img src="http://catalog.test/cover/{artist}.jpg"></div></div>
    <div class="pure-u-2-3">
      <div><b>{title}</b></div>
      <div>par <strong><a href="index.php?artist={artist}">{artist}</a></strong></div>
      <div>{tags}</div>
    </div>
  </div>
  <div class="mp3player"><div class="sm2-playlist-bd"><a href="http://catalog.test/dl/{artist}.mp3">{title}</a></div></div>
  <div class="legenddata">{spans}</div>
</div>"#
    )
}

pub fn listing_page(items: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Au Bout Du Fil</title></head><body><div id=\"page\">{}</div></body></html>",
        items.concat()
    )
}

pub fn sample_listing() -> String {
    listing_page(&[
        item(
            "Lune Rousse",
            "dee-yan-key",
            &["Acoustic", "Folk"],
            &[
                "14/03/2017",
                "4,5 / 5",
                "12 345",
                "98 765",
                r#"<a href="index.php?license=cc-byncnd">CC BY-NC-ND</a>"#,
            ],
        ),
        item(
            "Sans Note",
            "komiku",
            &["Electronic"],
            &["15/03/2017", "1 002", "3 004", r#"<a href="index.php?license=cc-by">CC BY</a>"#],
        ),
    ])
}
