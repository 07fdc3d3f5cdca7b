/// Error types shared across the Vaidya crates.
///
/// These represent failures in infrastructure components (the translation service and its
/// HTTP transport). Application-specific errors are defined in the server crate and wrap
/// `CommonError` via `#[from]`.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation service returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("translation service returned an empty translation")]
    EmptyTranslation,
}
