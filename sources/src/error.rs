use thiserror::Error;

/// Custom error type for fetching, allow us to differentiate between errors.
///
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Bad URL {0}: {1}")]
    BadUrl(String, String),
    #[error("HTTP Error: {0}")]
    Http(String),
    #[error("Bad HTTP status {0}")]
    Status(u16),
    #[error("Decoding locations: {0}")]
    Decode(String),
}
