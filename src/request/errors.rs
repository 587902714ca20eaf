use thiserror::Error;

/// Caller input that cannot be turned into a filter set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("unknown listing: {0}")]
    UnknownRoute(String),

    #[error("filter path segments must come in key/value pairs, got {0} segments")]
    OddSegments(usize),

    #[error("unsupported filter: {0}")]
    UnknownFilter(String),

    #[error("filter {0} has an empty value")]
    EmptyValue(String),
}
