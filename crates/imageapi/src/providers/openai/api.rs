use serde_json::{Value, json};
use tracing::{debug, info};

use crate::errors::ImageApiError;
use crate::types::{
    DEFAULT_IMAGE_MODEL, DEFAULT_IMAGE_QUALITY, DEFAULT_IMAGE_SIZE, IMAGE_COUNT, ImageClient,
};
use crate::utils::{decode_base64_image, download_image, ensure_success, truncate_prompt};

use super::models::{ImageGenerationResponse, ImagePayload};

/// Request a single image for `prompt` and return its raw bytes.
///
/// Inline `b64_json` payloads are decoded directly; a `url` result is
/// fetched with a second GET. Either request answering with a non-2xx status
/// yields [`ImageApiError::Http`].
pub async fn generate_image(client: &ImageClient, prompt: &str) -> Result<Vec<u8>, ImageApiError> {
    let url = client.generations_url();
    let payload = build_generation_payload(prompt);

    debug!(%url, prompt_chars = prompt.chars().count(), "sending image generation request");
    let response = client
        .http
        .post(&url)
        .bearer_auth(client.api_key())
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let response_text = ensure_success(response).await?.text().await?;
    let response: ImageGenerationResponse = serde_json::from_str(&response_text)?;

    match select_payload(&response)? {
        ImagePayload::Inline(data_b64) => {
            let bytes = decode_base64_image(data_b64)?;
            info!(bytes = bytes.len(), "received inline image");
            Ok(bytes)
        }
        ImagePayload::Remote(image_url) => {
            let bytes = download_image(&client.http, image_url).await?;
            info!(bytes = bytes.len(), "downloaded image from service url");
            Ok(bytes)
        }
    }
}

pub(crate) fn build_generation_payload(prompt: &str) -> Value {
    json!({
        "model": DEFAULT_IMAGE_MODEL,
        "prompt": truncate_prompt(prompt),
        "n": IMAGE_COUNT,
        "size": DEFAULT_IMAGE_SIZE,
        "quality": DEFAULT_IMAGE_QUALITY
    })
}

pub(crate) fn select_payload(
    response: &ImageGenerationResponse,
) -> Result<ImagePayload<'_>, ImageApiError> {
    let entry = response.data.first().ok_or_else(|| {
        ImageApiError::ResponseFormat("response contained no result entries".to_string())
    })?;

    if let Some(data_b64) = entry.b64_json.as_deref() {
        return Ok(ImagePayload::Inline(data_b64));
    }
    if let Some(url) = entry.url.as_deref() {
        return Ok(ImagePayload::Remote(url));
    }

    Err(ImageApiError::ResponseFormat(format!(
        "result entry has neither b64_json nor url (keys: [{}])",
        entry.field_names().join(", ")
    )))
}
