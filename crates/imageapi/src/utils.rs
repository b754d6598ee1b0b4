use base64::Engine as _;
use reqwest::{Client, Response};
use tracing::debug;

use crate::errors::ImageApiError;

/// Longest prompt, in characters, the generation endpoint accepts.
pub const MAX_PROMPT_CHARS: usize = 32_000;
const TRUNCATION_MARKER: &str = "...";

/// Clamp `prompt` to [`MAX_PROMPT_CHARS`], replacing the tail with `...`.
/// Prompts at or under the limit are returned unchanged.
pub fn truncate_prompt(prompt: &str) -> String {
    if prompt.chars().count() <= MAX_PROMPT_CHARS {
        return prompt.to_string();
    }

    let keep = MAX_PROMPT_CHARS - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = prompt.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}

pub fn decode_base64_image(data_b64: &str) -> Result<Vec<u8>, ImageApiError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(data_b64.trim())?;
    Ok(bytes)
}

pub async fn download_image(http: &Client, url: &str) -> Result<Vec<u8>, ImageApiError> {
    debug!(url, "downloading generated image");
    let response = ensure_success(http.get(url).send().await?).await?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Turn a non-2xx response into [`ImageApiError::Http`], keeping its body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ImageApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(ImageApiError::Http { status, url, body })
}
