use reqwest::StatusCode;
use thiserror::Error;

/// Failure surfaced by a single image generation or download call.
#[derive(Debug, Error)]
pub enum ImageApiError {
    /// The service answered with a non-2xx status. `body` carries the raw
    /// response text so content-policy and quota rejections can be logged.
    #[error("{status} returned by {url}")]
    Http {
        status: StatusCode,
        url: String,
        body: String,
    },
    /// The result entry carried neither inline image data nor a URL.
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to decode base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl ImageApiError {
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            ImageApiError::Http { status, .. } => Some(*status),
            ImageApiError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Response body text, when the service returned one with an error status.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ImageApiError::Http { body, .. } if !body.trim().is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}
