pub mod errors;
pub mod pipeline;
pub mod service;

pub use errors::ScrapeError;
pub use service::CatalogService;
