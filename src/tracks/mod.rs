pub mod dtos;
pub mod handlers;

pub use dtos::{ApiError, ErrorResponse};
pub use handlers::{list_tracks, redirect_homepage};
