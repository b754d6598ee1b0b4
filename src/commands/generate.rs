use std::path::Path;

use imageapi::{ImageApiError, ImageClient, generate_image};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::{RunConfig, resolve_api_key};
use crate::errors::RunError;
use crate::fs_utils::{
    append_generation_log, ensure_output_dir, output_exists, read_prompt_document, unix_timestamp,
    write_image,
};
use crate::models::{GenerationLogEntry, PromptRecord, RecordOutcome, RunSummary};
use crate::prompts::extract_prompts;

/// Anything that can turn a prompt into image bytes.
pub trait ImageSource {
    fn request_image(&self, prompt: &str) -> impl Future<Output = Result<Vec<u8>, ImageApiError>>;
}

impl ImageSource for ImageClient {
    async fn request_image(&self, prompt: &str) -> Result<Vec<u8>, ImageApiError> {
        generate_image(self, prompt).await
    }
}

/// Full invocation: credential, prompt document, then the batch itself.
///
/// Fails only on the fatal conditions (missing key, missing document,
/// unusable output directory); per-record failures are reported in the
/// returned summary.
pub async fn run(config: &RunConfig) -> Result<RunSummary, RunError> {
    let api_key = resolve_api_key()?;
    let document = read_prompt_document(&config.prompts_path).await?;
    let records = extract_prompts(&document);

    let client = ImageClient::new(api_key, config.endpoint.clone());
    run_batch(&client, &records, config).await
}

/// Render `records` in order, skipping any whose output file already exists.
pub async fn run_batch<S: ImageSource>(
    source: &S,
    records: &[PromptRecord],
    config: &RunConfig,
) -> Result<RunSummary, RunError> {
    let total = records.len();
    println!("Found {total} prompts to generate\n");

    let output_dir = ensure_output_dir(&config.output_dir).await?;
    let mut summary = RunSummary::default();

    for (index, record) in records.iter().enumerate() {
        println!("[{}/{}] Generating: {}", index + 1, total, record.title);
        let output_path = output_dir.join(&record.filename);

        if output_exists(&output_path).await {
            println!("  Skipping (already exists): {}", record.filename);
            debug!(number = record.number, file = %record.filename, "output present, skipping");
            summary.outcomes.push((record.number, RecordOutcome::Skipped));
            continue;
        }

        match render_record(source, record, &output_path).await {
            Ok(()) => {
                println!("  Saved: {}", record.filename);
                record_generation(&output_dir, record).await;
                summary
                    .outcomes
                    .push((record.number, RecordOutcome::Saved(output_path)));

                if index + 1 < total && !config.delay.is_zero() {
                    println!("  Waiting {}s (rate limit)...", config.delay.as_secs());
                    sleep(config.delay).await;
                }
            }
            Err(err) => {
                report_failure(record, &err);
                summary
                    .outcomes
                    .push((record.number, RecordOutcome::Failed(err.to_string())));
            }
        }
    }

    println!("\nDone! Images saved to: {}", output_dir.display());
    info!(
        saved = summary.saved(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        "render run finished"
    );
    Ok(summary)
}

async fn render_record<S: ImageSource>(
    source: &S,
    record: &PromptRecord,
    output_path: &Path,
) -> Result<(), RunError> {
    let bytes = source.request_image(&record.prompt).await?;
    println!("  Generated, saving...");
    write_image(output_path, &bytes).await
}

async fn record_generation(output_dir: &Path, record: &PromptRecord) {
    let entry = GenerationLogEntry {
        timestamp: unix_timestamp(),
        number: record.number,
        title: record.title.clone(),
        prompt: record.prompt.clone(),
        output_image: record.filename.clone(),
    };

    if let Err(err) = append_generation_log(output_dir, entry).await {
        warn!(error = %err, "failed to update generation log");
    }
}

fn report_failure(record: &PromptRecord, err: &RunError) {
    println!("  ERROR: {err}");

    let api_error = match err {
        RunError::Image(api_error) => Some(api_error),
        _ => None,
    };
    if let Some(body) = api_error.and_then(ImageApiError::response_body) {
        println!("  Response: {body}");
    }

    warn!(
        number = record.number,
        status = ?api_error.and_then(ImageApiError::http_status),
        "image generation failed"
    );
}
