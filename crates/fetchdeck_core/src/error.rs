use thiserror::Error;

/// Every way a typed fetch can fail.
///
/// Transport and decode errors are folded into one of these kinds before they
/// leave the engine; the `Display` text is what a front end shows next to its
/// "try again" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FetchError {
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("No data received from server")]
    NoData,
    #[error("Failed to decode response")]
    DecodingError,
    #[error("Server error (status {0})")]
    ServerError(u16),
    #[error("An unknown error occurred")]
    Unknown,
}

impl FetchError {
    /// HTTP status carried by `ServerError`, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ServerError(code) => Some(*code),
            _ => None,
        }
    }
}
