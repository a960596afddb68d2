use thiserror::Error;

/// Failures surfaced by the Resource API.
///
/// Transport errors carry the underlying message as text so completed-call
/// actions stay `Clone` across the action channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Network or HTTP-level failure before an envelope could be read.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The backend answered with a non-zero result code.
    #[error("backend error {code}: {message}")]
    Backend { code: i64, message: String },

    /// The response body did not match the envelope contract.
    #[error("malformed response: {0}")]
    Protocol(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
