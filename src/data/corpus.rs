// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads the raw question corpus: one big JSON object mapping
// question id → { "imageId": ..., "question": ..., "answer": ...,
// plus extra fields we ignore }.
//
// The corpus is treated as partially trusted data:
//   - a missing corpus FILE is fatal (nothing to work with)
//   - a malformed ENTRY is silently dropped, the same way an
//     entry whose image file is absent from disk is dropped
//
// Iteration order matters: the filtered record list feeds a
// seeded sampler, so the same corpus file must always produce
// the same list in the same order. serde_json's preserve_order
// feature keeps entries in file order for exactly this reason.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::domain::record::VqaRecord;
use crate::domain::traits::CorpusSource;

/// Loads qualifying records from a GQA-style question corpus.
/// Implements the CorpusSource trait from Layer 3.
pub struct JsonCorpusLoader {
    /// Path to the corpus JSON file
    corpus_file: PathBuf,

    /// Directory holding `{imageId}.jpg` files
    images_dir: PathBuf,
}

impl JsonCorpusLoader {
    pub fn new(corpus_file: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_file: corpus_file.into(),
            images_dir:  images_dir.into(),
        }
    }

    /// Pull the three required string fields out of one corpus entry.
    /// Returns None when any field is missing, non-string, or empty —
    /// the caller drops such entries without error.
    fn entry_fields(info: &Value) -> Option<(&str, &str, &str)> {
        let image_id = info.get("imageId")?.as_str()?;
        let question = info.get("question")?.as_str()?;
        let answer   = info.get("answer")?.as_str()?;
        if image_id.is_empty() || question.is_empty() || answer.is_empty() {
            return None;
        }
        Some((image_id, question, answer))
    }

    /// Conventional image location: `{images_dir}/{imageId}.jpg`
    fn image_path(&self, image_id: &str) -> PathBuf {
        self.images_dir.join(format!("{image_id}.jpg"))
    }
}

impl CorpusSource for JsonCorpusLoader {
    fn load_all(&self) -> Result<Vec<VqaRecord>> {
        let records = load_corpus(&self.corpus_file, |question_id, info| {
            let (image_id, question, answer) = match Self::entry_fields(info) {
                Some(fields) => fields,
                None => return FilterOutcome::BadFields,
            };
            let image_path = self.image_path(image_id);
            if !image_path.exists() {
                return FilterOutcome::MissingImage;
            }
            FilterOutcome::Keep(VqaRecord::new(
                question_id,
                image_id,
                image_path.display().to_string(),
                question,
                answer,
            ))
        })?;
        Ok(records)
    }
}

/// Outcome of filtering one corpus entry.
enum FilterOutcome {
    Keep(VqaRecord),
    BadFields,
    MissingImage,
}

/// Walk the corpus object in file order, applying `filter` to each entry.
///
/// Dropped entries are counted in two buckets — malformed fields vs
/// missing image file — and both counts are logged at debug level so
/// a data-quality problem can be told apart from a half-synced image
/// directory without changing the silent-skip behaviour.
fn load_corpus(
    corpus_file: &Path,
    filter: impl Fn(&str, &Value) -> FilterOutcome,
) -> Result<Vec<VqaRecord>> {
    let json = std::fs::read_to_string(corpus_file)
        .with_context(|| format!("Questions file not found at '{}'", corpus_file.display()))?;

    let corpus: serde_json::Map<String, Value> = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a JSON object", corpus_file.display()))?;

    let total = corpus.len();
    tracing::info!("Loaded {} questions from '{}'", total, corpus_file.display());

    let mut records        = Vec::new();
    let mut bad_fields     = 0usize;
    let mut missing_images = 0usize;

    for (counter, (question_id, info)) in corpus.iter().enumerate() {
        match filter(question_id.as_str(), info) {
            FilterOutcome::Keep(record)   => records.push(record),
            FilterOutcome::BadFields      => bad_fields += 1,
            FilterOutcome::MissingImage   => missing_images += 1,
        }

        let done = counter + 1;
        if done % 1000 == 0 || done == total {
            tracing::info!(
                "Processed {}/{} questions... ({:.1}%)",
                done,
                total,
                done as f64 / total as f64 * 100.0
            );
        }
    }

    tracing::debug!(
        "Dropped {} entries with missing/invalid fields, {} with no image on disk",
        bad_fields,
        missing_images
    );

    Ok(records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Write a corpus file and an images dir with the given image ids present.
    fn fixture(corpus_json: &str, images: &[&str]) -> (TempDir, JsonCorpusLoader) {
        let dir = TempDir::new().unwrap();
        let corpus_file = dir.path().join("questions.json");
        fs::write(&corpus_file, corpus_json).unwrap();

        let images_dir = dir.path().join("images");
        fs::create_dir(&images_dir).unwrap();
        for id in images {
            // Content doesn't matter for the existence filter
            fs::write(images_dir.join(format!("{id}.jpg")), b"jpg").unwrap();
        }

        let loader = JsonCorpusLoader::new(&corpus_file, &images_dir);
        (dir, loader)
    }

    #[test]
    fn test_keeps_qualifying_entries_in_file_order() {
        let (_dir, loader) = fixture(
            r#"{
                "q2": {"imageId": "b", "question": "Is it b?", "answer": "yes"},
                "q1": {"imageId": "a", "question": "Is it a?", "answer": "no"}
            }"#,
            &["a", "b"],
        );
        let records = loader.load_all().unwrap();
        // File order, not alphabetical order
        let ids: Vec<_> = records.iter().map(|r| r.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q2", "q1"]);
        assert!(records[0].image_path.ends_with("b.jpg"));
    }

    #[test]
    fn test_drops_entries_with_missing_fields() {
        let (_dir, loader) = fixture(
            r#"{
                "ok":        {"imageId": "a", "question": "q?", "answer": "yes"},
                "no_answer": {"imageId": "a", "question": "q?"},
                "empty":     {"imageId": "", "question": "q?", "answer": "yes"},
                "wrong_type":{"imageId": 7,  "question": "q?", "answer": "yes"}
            }"#,
            &["a"],
        );
        let records = loader.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question_id, "ok");
    }

    #[test]
    fn test_drops_entries_whose_image_is_missing() {
        let (_dir, loader) = fixture(
            r#"{
                "here": {"imageId": "a", "question": "q?", "answer": "yes"},
                "gone": {"imageId": "zz", "question": "q?", "answer": "yes"}
            }"#,
            &["a"],
        );
        let records = loader.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].image_id, "a");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let (_dir, loader) = fixture(
            r#"{"q": {"imageId": "a", "question": "q?", "answer": "yes",
                      "isBalanced": true, "semantic": [1, 2]}}"#,
            &["a"],
        );
        assert_eq!(loader.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_corpus_file_is_fatal() {
        let loader = JsonCorpusLoader::new("/nonexistent/questions.json", "/nonexistent/images");
        assert!(loader.load_all().is_err());
    }
}
