pub mod errors;
pub mod filters;
pub mod normalize;
pub mod vocabulary;

pub use errors::NormalizeError;
pub use filters::{FilterSet, SortMode};
pub use normalize::{QueryFilters, normalize};
