pub mod errors;
pub mod providers;
pub mod types;
pub mod utils;

pub use errors::ImageApiError;
pub use providers::openai::generate_image;
pub use reqwest::StatusCode;
pub use types::ImageClient;
pub use utils::{MAX_PROMPT_CHARS, truncate_prompt};
