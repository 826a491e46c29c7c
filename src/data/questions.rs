// ============================================================
// Layer 4 — Questions File Loader
// ============================================================
// Reads the plain-text questions file for an inference session:
// one question per line, blank lines ignored.
//
// Every question is normalised to end with a question mark here,
// before inference, so the transcript and the model both see the
// same text. The model was trained on question-marked inputs;
// a missing '?' measurably shifts its answers.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Load and normalise the questions for one session.
pub fn load_questions(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read questions file '{}'", path.display()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(normalise_question)
        .collect())
}

/// Append a terminal '?' when the question lacks one.
fn normalise_question(line: &str) -> String {
    if line.ends_with('?') {
        line.to_string()
    } else {
        format!("{line}?")
    }
}
