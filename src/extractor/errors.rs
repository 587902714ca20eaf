use thiserror::Error;

/// Page-level extraction failures. Field-level misses never end up here.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("malformed listing: {candidates} item containers found, none with the expected structure")]
    Structure { candidates: usize },
}
