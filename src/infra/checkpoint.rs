// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Reads the pretrained model artifacts with Burn's CompactRecorder.
//
// What lives in a model directory:
//   1. model.mpk.gz       — fine-tuned weights (MessagePack + gzip)
//   2. model_config.json  — model architecture config
//   3. answer_vocab.json  — JSON array of answer labels;
//                           array index = classifier class id
//   4. tokenizer.json     — the paired tokenizer (see TokenizerStore)
//
// Why is the config stored separately?
//   When loading for inference, we need the exact architecture
//   (d_model, num_layers, patch geometry, ...) to rebuild the
//   model before the weights can be restored into it.
//
// Burn's CompactRecorder is type-safe: loading fails if the
// rebuilt architecture doesn't match the recorded weights.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{bail, Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{ViltVqaConfig, ViltVqaModel};

/// Read-only access to one pretrained model directory.
/// Unlike a training checkpoint store, this never creates anything —
/// the artifacts are produced elsewhere and only consumed here.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Fatal check that the model directory exists at all.
    /// Called before anything is loaded or written so a bad path
    /// fails with one clear message.
    pub fn validate(&self) -> Result<()> {
        if !self.dir.exists() {
            bail!("Model directory '{}' does not exist", self.dir.display());
        }
        Ok(())
    }

    /// Load the model architecture config from model_config.json.
    pub fn load_config(&self) -> Result<ViltVqaConfig> {
        let path = self.dir.join("model_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot read model config from '{}'", path.display())
            })?;
        serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid model config", path.display()))
    }

    /// Load the fine-tuned weights into a freshly initialised model.
    ///
    /// The model parameter must have the architecture from
    /// load_config() or the recorder will refuse the weights.
    pub fn load_model<B: Backend>(
        &self,
        model:  ViltVqaModel<B>,
        device: &B::Device,
    ) -> Result<ViltVqaModel<B>> {
        // CompactRecorder appends its own .mpk.gz extension
        let path = self.dir.join("model");

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load model weights from '{}'", path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Load the answer vocabulary: a JSON array of labels where the
    /// array index is the classifier's class id.
    pub fn load_answer_vocab(&self) -> Result<Vec<String>> {
        let path = self.dir.join("answer_vocab.json");
        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!("Cannot read answer vocabulary from '{}'", path.display())
            })?;
        let labels: Vec<String> = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a JSON array of labels", path.display()))?;
        if labels.is_empty() {
            bail!("Answer vocabulary '{}' is empty", path.display());
        }
        Ok(labels)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_dir_fails() {
        let ckpt = CheckpointManager::new("/nonexistent/model_dir");
        assert!(ckpt.validate().is_err());
    }

    #[test]
    fn test_load_config_round_trip() {
        let dir  = TempDir::new().unwrap();
        let json = r#"{
            "vocab_size": 30522, "max_text_len": 40,
            "image_size": 384, "patch_size": 32,
            "d_model": 768, "num_heads": 12, "num_layers": 12,
            "d_ff": 3072, "dropout": 0.1, "num_answers": 3129
        }"#;
        fs::write(dir.path().join("model_config.json"), json).unwrap();

        let cfg = CheckpointManager::new(dir.path()).load_config().unwrap();
        assert_eq!(cfg.image_size, 384);
        assert_eq!(cfg.num_patches(), 144);
        assert_eq!(cfg.num_answers, 3129);
    }

    #[test]
    fn test_load_answer_vocab() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("answer_vocab.json"),
            r#"["yes", "no", "blue"]"#,
        ).unwrap();

        let labels = CheckpointManager::new(dir.path()).load_answer_vocab().unwrap();
        assert_eq!(labels, vec!["yes", "no", "blue"]);
    }

    #[test]
    fn test_empty_answer_vocab_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("answer_vocab.json"), "[]").unwrap();
        assert!(CheckpointManager::new(dir.path()).load_answer_vocab().is_err());
    }
}
