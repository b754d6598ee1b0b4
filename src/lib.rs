pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fs_utils;
pub mod models;
pub mod prompts;

pub use commands::generate::{ImageSource, run, run_batch};
pub use commands::list::list_prompts;
pub use config::{Cli, RunConfig, resolve_api_key, resolve_api_key_from};
pub use errors::RunError;
pub use models::{GenerationLogEntry, PromptRecord, RecordOutcome, RunSummary};
pub use prompts::{build_file_name, extract_prompts, slugify};
