use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Non-2xx response, rendered the way the web client reports them.
    #[error("Error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("campsite {0} not found")]
    CampsiteNotFound(u32),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub u8);
