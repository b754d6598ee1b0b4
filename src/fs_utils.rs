use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs;
use tokio::fs::try_exists;
use tracing::{debug, warn};

use crate::constants::{LOG_FILE_NAME, MAX_LOG_ENTRIES};
use crate::errors::RunError;
use crate::models::GenerationLogEntry;

/// Create `dir` (and parents) when missing; an existing directory is fine.
pub async fn ensure_output_dir(dir: &Path) -> Result<PathBuf, RunError> {
    if !try_exists(dir)
        .await
        .map_err(|err| RunError::io(dir, err))?
    {
        fs::create_dir_all(dir)
            .await
            .map_err(|err| RunError::io(dir, err))?;
        debug!(dir = %dir.display(), "created output directory");
    }
    Ok(dir.to_path_buf())
}

/// Existence alone decides whether a record is already rendered.
pub async fn output_exists(path: &Path) -> bool {
    match try_exists(path).await {
        Ok(exists) => exists,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not check output file");
            false
        }
    }
}

/// Create or overwrite `path` with `bytes`. The parent directory must exist.
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<(), RunError> {
    fs::write(path, bytes)
        .await
        .map_err(|err| RunError::io(path, err))
}

pub async fn read_prompt_document(path: &Path) -> Result<String, RunError> {
    if !try_exists(path)
        .await
        .map_err(|err| RunError::io(path, err))?
    {
        return Err(RunError::NotFound(path.to_path_buf()));
    }

    fs::read_to_string(path)
        .await
        .map_err(|err| RunError::io(path, err))
}

pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Append to `<dir>/log.json`, keeping the newest [`MAX_LOG_ENTRIES`].
pub async fn append_generation_log(
    dir: &Path,
    entry: GenerationLogEntry,
) -> Result<(), RunError> {
    let path = dir.join(LOG_FILE_NAME);
    let mut entries = read_generation_log(dir).await?;

    entries.push(entry);
    if entries.len() > MAX_LOG_ENTRIES {
        entries = entries.split_off(entries.len() - MAX_LOG_ENTRIES);
    }

    let payload = serde_json::to_string_pretty(&entries).map_err(|err| {
        RunError::io(&path, std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })?;

    fs::write(&path, payload)
        .await
        .map_err(|err| RunError::io(&path, err))
}

/// Entries from `<dir>/log.json`; a missing or unreadable log reads as empty.
pub async fn read_generation_log(dir: &Path) -> Result<Vec<GenerationLogEntry>, RunError> {
    let path = dir.join(LOG_FILE_NAME);
    if !try_exists(&path)
        .await
        .map_err(|err| RunError::io(&path, err))?
    {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(&path)
        .await
        .unwrap_or_else(|_| "[]".to_string());
    Ok(serde_json::from_str(&contents).unwrap_or_default())
}
