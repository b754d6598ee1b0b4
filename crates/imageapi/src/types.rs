pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1.5";
/// Landscape output, suited to diagrams and infographics.
pub const DEFAULT_IMAGE_SIZE: &str = "1536x1024";
pub const DEFAULT_IMAGE_QUALITY: &str = "high";
pub const IMAGE_COUNT: u32 = 1;

#[derive(Clone)]
pub struct ImageClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) http: reqwest::Client,
}

impl ImageClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_default_endpoint(api_key: impl Into<String>) -> Self {
        Self::new(api_key, DEFAULT_ENDPOINT)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn generations_url(&self) -> String {
        format!("{}/images/generations", self.endpoint.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
