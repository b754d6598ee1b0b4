use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use imageapi::types::DEFAULT_ENDPOINT;

use crate::constants::{
    API_KEY_ENV, DEFAULT_OUTPUT_DIR_NAME, DEFAULT_PROMPTS_FILE, DEFAULT_REQUEST_DELAY_SECS,
};
use crate::errors::RunError;

/// Render every numbered prompt in a markdown document to a PNG image.
#[derive(Debug, Parser)]
#[command(name = "prompt-render", version, about)]
pub struct Cli {
    /// Markdown document holding `## N. Title` / `**Prompt:**` sections.
    #[arg(long, default_value = DEFAULT_PROMPTS_FILE)]
    pub prompts: PathBuf,

    /// Directory the generated images are written to.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR_NAME)]
    pub output_dir: PathBuf,

    /// Pause after each saved image, in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_SECS)]
    pub delay_secs: u64,

    /// Base URL of the image service.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Print the parsed prompts and their target filenames, then exit.
    #[arg(long)]
    pub list: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub prompts_path: PathBuf,
    pub output_dir: PathBuf,
    pub delay: Duration,
    pub endpoint: String,
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            prompts_path: cli.prompts.clone(),
            output_dir: cli.output_dir.clone(),
            delay: Duration::from_secs(cli.delay_secs),
            endpoint: cli.endpoint.clone(),
        }
    }
}

/// Read the image service key from `OPENAI_API_KEY`.
pub fn resolve_api_key() -> Result<String, RunError> {
    resolve_api_key_from(API_KEY_ENV)
}

pub fn resolve_api_key_from(var: &str) -> Result<String, RunError> {
    env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| RunError::Configuration(var.to_string()))
}
