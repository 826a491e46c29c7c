// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw corpus files and the records the
// use cases operate on.
//
// The subset pipeline flows in this order:
//
//   corpus JSON (question id → entry)
//       │
//       ▼
//   JsonCorpusLoader  → qualifying VqaRecords, file order
//       │
//       ▼
//   sample_subset     → seeded draw of the target size
//       │
//       ▼
//   SubsetDataset     → one JSON array on disk
//       │
//       ▼
//   Variant::apply    → per-image augmented copies
//
// The questions module is the small odd one out: it feeds the
// inference session, not the subset pipeline.
//
// Each module is responsible for exactly one step.

/// Loads and filters the question corpus JSON
pub mod corpus;

/// Seeded uniform sampling without replacement
pub mod sampler;

/// Subset persistence + Burn Dataset implementation
pub mod dataset;

/// Deterministic image transforms for augmentation
pub mod augment;

/// Plain-text questions file for inference sessions
pub mod questions;
