pub mod app_state;
pub mod cache;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod request;
pub mod scrape;
pub mod server;
pub mod telemetry;
pub mod tracks;
