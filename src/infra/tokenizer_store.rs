// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the tokenizer that was fine-tuned alongside the model.
// The tokenizer.json sits in the same model directory as the
// weights — the two are a pair and must never be mixed across
// checkpoints, or token ids stop lining up with the embedding
// table.

use anyhow::Result;
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the tokenizer JSON from the model directory
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", path.display(), e
            ))
    }
}
