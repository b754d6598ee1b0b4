use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    pub created: Option<u64>,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
pub struct ImageData {
    pub b64_json: Option<String>,
    pub url: Option<String>,
    pub revised_prompt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageData {
    /// Keys present on the entry, used to describe an unexpected shape.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        if self.b64_json.is_some() {
            names.push("b64_json".into());
        }
        if self.url.is_some() {
            names.push("url".into());
        }
        if self.revised_prompt.is_some() {
            names.push("revised_prompt".into());
        }
        names.extend(self.extra.keys().cloned());
        names
    }
}

/// Where the bytes of a generated image can be found.
#[derive(Debug, PartialEq, Eq)]
pub enum ImagePayload<'a> {
    Inline(&'a str),
    Remote(&'a str),
}
