use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One numbered prompt section extracted from the prompt document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub number: u64,
    pub title: String,
    pub prompt: String,
    /// `NN-slug.png`, derived only from `number` and `title`.
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped,
    Saved(PathBuf),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<(u64, RecordOutcome)>,
}

impl RunSummary {
    pub fn saved(&self) -> usize {
        self.count(|outcome| matches!(outcome, RecordOutcome::Saved(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, RecordOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, RecordOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationLogEntry {
    pub timestamp: u64,
    pub number: u64,
    pub title: String,
    pub prompt: String,
    pub output_image: String,
}
