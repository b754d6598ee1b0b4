use crate::config::RunConfig;
use crate::errors::RunError;
use crate::fs_utils::{output_exists, read_prompt_document};
use crate::models::PromptRecord;
use crate::prompts::extract_prompts;

/// Parse the prompt document and print what a run would produce.
/// Needs neither a credential nor the network.
pub async fn list_prompts(config: &RunConfig) -> Result<Vec<PromptRecord>, RunError> {
    let document = read_prompt_document(&config.prompts_path).await?;
    let records = extract_prompts(&document);

    println!("Found {} prompts in {}\n", records.len(), config.prompts_path.display());
    for record in &records {
        let done = output_exists(&config.output_dir.join(&record.filename)).await;
        println!("{}", listing_line(record, done));
    }

    Ok(records)
}

fn listing_line(record: &PromptRecord, done: bool) -> String {
    let status = if done { "done" } else { "pending" };
    format!(
        "{:>4}  {:<8} {}  {}  ({} chars)",
        record.number,
        status,
        record.filename,
        record.title,
        record.prompt.chars().count()
    )
}
