// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// the seams where one layer plugs into another.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - JsonCorpusLoader implements CorpusSource
//   - A future parquet or sqlite loader could too
//   - The sample use case only sees CorpusSource
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::record::VqaRecord;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the qualifying records of a corpus.
///
/// Implementations:
///   - JsonCorpusLoader → reads the GQA question-id → entry JSON map
pub trait CorpusSource {
    /// Load every qualifying record, in a deterministic order.
    /// An entry that is malformed or whose image is missing is
    /// silently dropped, never an error.
    fn load_all(&self) -> Result<Vec<VqaRecord>>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that can answer natural language questions
/// about a fixed image.
///
/// Implementations:
///   - VqaSession → one loaded model bound to one preprocessed image
pub trait QuestionAnswerer {
    /// Answer a single question. Returns the chosen answer label and
    /// the model's confidence in it (normalised probability).
    fn answer(&self, question: &str) -> Result<(String, f32)>;
}
