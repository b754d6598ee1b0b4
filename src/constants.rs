pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_PROMPTS_FILE: &str = "images.md";
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "images";
pub const DEFAULT_REQUEST_DELAY_SECS: u64 = 12;
pub const IMAGE_EXTENSION: &str = "png";
pub const LOG_FILE_NAME: &str = "log.json";
pub const MAX_LOG_ENTRIES: usize = 200;
pub const PROMPT_LABEL: &str = "**Prompt:**";
