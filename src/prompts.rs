//! Prompt document parsing.
//!
//! A prompt document is markdown made of numbered sections:
//!
//! ```text
//! ## 3. System Architecture
//!
//! **Prompt:** A layered diagram showing ...
//! more prompt text ...
//!
//! ---
//! ```
//!
//! A prompt block runs until a horizontal rule, the next `## ` heading
//! (including the trailing `## Usage Notes` section), or the end of the
//! document. Headings that are not followed by a blank line and a
//! `**Prompt:**` line are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::constants::{IMAGE_EXTENSION, PROMPT_LABEL};
use crate::models::PromptRecord;

static HEADING_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^## (\d+)\. (.+)$").expect("heading regex should compile"));
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("slug filter regex should compile"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

/// Extract every well-formed prompt section, in document order.
pub fn extract_prompts(document: &str) -> Vec<PromptRecord> {
    let lines: Vec<&str> = document.lines().collect();
    let mut records = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let Some((number, title)) = parse_heading(lines[index]) else {
            index += 1;
            continue;
        };

        let blank = lines.get(index + 1).copied();
        let label_line = lines.get(index + 2).and_then(|line| line.strip_prefix(PROMPT_LABEL));
        let (Some(""), Some(first)) = (blank, label_line) else {
            index += 1;
            continue;
        };

        let mut body = vec![first];
        let mut cursor = index + 3;
        while cursor < lines.len() && !ends_prompt_block(lines[cursor]) {
            body.push(lines[cursor]);
            cursor += 1;
        }

        let prompt = body.join("\n").trim().to_string();
        if !prompt.is_empty() {
            records.push(PromptRecord {
                filename: build_file_name(number, &title),
                number,
                title,
                prompt,
            });
        }
        index = cursor;
    }

    records
}

/// `NN-slug.png`: the number zero-padded to two digits and a slug of the title.
pub fn build_file_name(number: u64, title: &str) -> String {
    format!("{number:02}-{}.{IMAGE_EXTENSION}", slugify(title))
}

/// Drop everything but word characters, whitespace and hyphens, lowercase,
/// and join the remaining words with single hyphens.
pub fn slugify(title: &str) -> String {
    let cleaned = NON_SLUG_CHARS.replace_all(title, "");
    let lowered = cleaned.trim().to_lowercase();
    WHITESPACE_RUN.replace_all(&lowered, "-").into_owned()
}

fn parse_heading(line: &str) -> Option<(u64, String)> {
    let captures = HEADING_REGEX.captures(line)?;
    let number = match captures[1].parse::<u64>() {
        Ok(number) => number,
        Err(err) => {
            debug!(heading = line, error = %err, "section number out of range, skipping heading");
            return None;
        }
    };
    Some((number, captures[2].trim_end().to_string()))
}

fn ends_prompt_block(line: &str) -> bool {
    is_horizontal_rule(line) || line.starts_with("## ")
}

fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}
