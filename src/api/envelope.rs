use serde::Deserialize;

use super::error::ApiError;

/// Uniform response envelope used by every Resource API endpoint.
/// `code == 0` is success; anything else is an application-level failure
/// carrying a human-readable message.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default = "none")]
    pub data: Option<T>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Collapses the envelope into a result, mapping non-zero codes to
    /// [`ApiError::Backend`].
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.code == 0 {
            Ok(self.data)
        } else {
            Err(ApiError::Backend {
                code: self.code,
                message: self.message,
            })
        }
    }
}
