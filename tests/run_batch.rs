use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use imageapi::{ImageApiError, StatusCode};
use prompt_render_lib::fs_utils::read_generation_log;
use prompt_render_lib::{
    ImageSource, RecordOutcome, RunConfig, RunError, extract_prompts, run, run_batch,
};

const DOCUMENT: &str = "# Handbook figures

## 1. Request Path

**Prompt:** A request travelling from browser to database.

---

## 2. Retry Budget

**Prompt:** A gauge showing the remaining retry budget.

---

## 3. Storage Tiers

**Prompt:** Hot, warm and cold storage stacked vertically.

## Usage Notes

Delete an image to regenerate it.
";

enum Reply {
    Image(&'static [u8]),
    /// Returns bytes, but a directory has appeared at the given output path
    /// by the time the write happens.
    BlockedWrite(PathBuf, &'static [u8]),
    Status(u16, &'static str),
    Shapeless,
}

/// Replays one scripted reply per call and records every prompt it saw.
struct ScriptedSource {
    replies: Mutex<Vec<Reply>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedSource {
    fn new(mut replies: Vec<Reply>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl ImageSource for ScriptedSource {
    async fn request_image(&self, prompt: &str) -> Result<Vec<u8>, ImageApiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .expect("more requests than scripted replies");

        match reply {
            Reply::Image(bytes) => Ok(bytes.to_vec()),
            Reply::BlockedWrite(path, bytes) => {
                std::fs::create_dir_all(&path).unwrap();
                Ok(bytes.to_vec())
            }
            Reply::Status(code, body) => Err(ImageApiError::Http {
                status: StatusCode::from_u16(code).unwrap(),
                url: "http://test/v1/images/generations".to_string(),
                body: body.to_string(),
            }),
            Reply::Shapeless => Err(ImageApiError::ResponseFormat(
                "result entry has neither b64_json nor url (keys: [revised_prompt])".to_string(),
            )),
        }
    }
}

fn config_for(output_dir: &Path) -> RunConfig {
    RunConfig {
        prompts_path: output_dir.join("images.md"),
        output_dir: output_dir.to_path_buf(),
        delay: Duration::ZERO,
        endpoint: "http://test/v1".to_string(),
    }
}

#[tokio::test]
async fn failure_on_one_record_does_not_stop_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp.path().join("images"));
    let records = extract_prompts(DOCUMENT);
    let source = ScriptedSource::new(vec![
        Reply::Image(b"first"),
        Reply::Status(429, r#"{"error":{"message":"rate limited"}}"#),
        Reply::Image(b"third"),
    ]);

    let summary = run_batch(&source, &records, &config).await.unwrap();

    assert_eq!(source.calls(), 3);
    assert_eq!(summary.saved(), 2);
    assert_eq!(summary.failed(), 1);
    assert!(matches!(summary.outcomes[1], (2, RecordOutcome::Failed(_))));

    let dir = &config.output_dir;
    assert_eq!(std::fs::read(dir.join("01-request-path.png")).unwrap(), b"first");
    assert!(!dir.join("02-retry-budget.png").exists());
    assert_eq!(std::fs::read(dir.join("03-storage-tiers.png")).unwrap(), b"third");
}

#[tokio::test]
async fn unexpected_response_shape_is_logged_and_skipped_past() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());
    let records = extract_prompts(DOCUMENT);
    let source = ScriptedSource::new(vec![
        Reply::Shapeless,
        Reply::Image(b"second"),
        Reply::Image(b"third"),
    ]);

    let summary = run_batch(&source, &records, &config).await.unwrap();

    match &summary.outcomes[0] {
        (1, RecordOutcome::Failed(message)) => assert!(message.contains("b64_json")),
        other => panic!("expected first record to fail, got {other:?}"),
    }
    assert_eq!(summary.saved(), 2);
}

#[tokio::test]
async fn rerun_with_all_outputs_present_makes_no_requests() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());
    let records = extract_prompts(DOCUMENT);

    let first = ScriptedSource::new(vec![
        Reply::Image(b"a"),
        Reply::Image(b"b"),
        Reply::Image(b"c"),
    ]);
    run_batch(&first, &records, &config).await.unwrap();

    let second = ScriptedSource::new(Vec::new());
    let reparsed = extract_prompts(DOCUMENT);
    let summary = run_batch(&second, &reparsed, &config).await.unwrap();

    assert_eq!(second.calls(), 0);
    assert_eq!(summary.skipped(), 3);
}

#[tokio::test]
async fn failed_record_is_retried_on_the_next_run() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());
    let records = extract_prompts(DOCUMENT);

    let first = ScriptedSource::new(vec![
        Reply::Image(b"a"),
        Reply::Status(500, "upstream exploded"),
        Reply::Image(b"c"),
    ]);
    run_batch(&first, &records, &config).await.unwrap();

    let second = ScriptedSource::new(vec![Reply::Image(b"b")]);
    let summary = run_batch(&second, &records, &config).await.unwrap();

    assert_eq!(second.calls(), 1);
    assert_eq!(
        second.prompts.lock().unwrap()[0],
        "A gauge showing the remaining retry budget."
    );
    assert_eq!(summary.saved(), 1);
    assert_eq!(summary.skipped(), 2);
}

#[tokio::test]
async fn empty_document_is_a_no_op() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp.path().join("out"));
    let records = extract_prompts("# Nothing to draw\n");
    let source = ScriptedSource::new(Vec::new());

    let summary = run_batch(&source, &records, &config).await.unwrap();

    assert!(summary.outcomes.is_empty());
    assert_eq!(source.calls(), 0);
    assert!(config.output_dir.is_dir());
}

#[tokio::test]
async fn saved_images_are_recorded_in_generation_log() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());
    let records = extract_prompts(DOCUMENT);
    let source = ScriptedSource::new(vec![
        Reply::Image(b"a"),
        Reply::Status(400, "policy"),
        Reply::Image(b"c"),
    ]);

    run_batch(&source, &records, &config).await.unwrap();

    let log = read_generation_log(&config.output_dir).await.unwrap();
    let files: Vec<&str> = log.iter().map(|entry| entry.output_image.as_str()).collect();
    assert_eq!(files, vec!["01-request-path.png", "03-storage-tiers.png"]);
}

#[tokio::test(start_paused = true)]
async fn pacing_applies_between_saved_records_only() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = config_for(temp.path());
    config.delay = Duration::from_millis(150);
    let records = extract_prompts(DOCUMENT);
    std::fs::write(temp.path().join("01-request-path.png"), b"old").unwrap();
    let source = ScriptedSource::new(vec![Reply::Image(b"b"), Reply::Image(b"c")]);

    let started = tokio::time::Instant::now();
    run_batch(&source, &records, &config).await.unwrap();
    let elapsed = started.elapsed();

    // One pause after record 2; none after the skip or after the last record.
    // A save followed only by skipped records still pauses once: the rule
    // looks at position in the document, not at what the next record does.
    assert!(elapsed >= Duration::from_millis(150));
    assert!(elapsed < Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn failed_records_are_not_followed_by_a_pause() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = config_for(temp.path());
    config.delay = Duration::from_millis(100);
    let records = extract_prompts(DOCUMENT);
    let source = ScriptedSource::new(vec![
        Reply::Status(500, "first down"),
        Reply::Status(500, "second down"),
        Reply::Image(b"c"),
    ]);

    let started = tokio::time::Instant::now();
    let summary = run_batch(&source, &records, &config).await.unwrap();

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(summary.failed(), 2);
    assert_eq!(summary.saved(), 1);
}

#[tokio::test]
async fn write_failure_is_recorded_and_the_run_continues() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());
    let records = extract_prompts(DOCUMENT);
    let blocked = temp.path().join("02-retry-budget.png");
    let source = ScriptedSource::new(vec![
        Reply::Image(b"a"),
        Reply::BlockedWrite(blocked.clone(), b"b"),
        Reply::Image(b"c"),
    ]);

    let summary = run_batch(&source, &records, &config).await.unwrap();

    assert_eq!(source.calls(), 3);
    match &summary.outcomes[1] {
        (2, RecordOutcome::Failed(message)) => assert!(message.contains("02-retry-budget.png")),
        other => panic!("expected write failure for record 2, got {other:?}"),
    }
    assert!(blocked.is_dir());
    assert_eq!(
        std::fs::read(temp.path().join("03-storage-tiers.png")).unwrap(),
        b"c"
    );
}

#[test]
fn missing_credential_aborts_before_reading_prompts() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(temp.path());

    temp_env::with_var("OPENAI_API_KEY", None::<&str>, || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let err = runtime.block_on(run(&config)).unwrap_err();
        assert!(matches!(err, RunError::Configuration(_)));
    });
}

#[test]
fn missing_document_aborts_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_for(&temp.path().join("images"));

    temp_env::with_var("OPENAI_API_KEY", Some("sk-test"), || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let err = runtime.block_on(run(&config)).unwrap_err();
        assert!(matches!(err, RunError::NotFound(_)));
        assert!(!config.output_dir.exists());
    });
}
