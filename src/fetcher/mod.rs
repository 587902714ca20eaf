pub mod charset;
pub mod client;
pub mod errors;
pub mod types;

#[cfg(test)]
pub use client::MockPageSource;
pub use client::{HttpFetcher, PageSource};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
