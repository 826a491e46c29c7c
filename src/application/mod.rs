// ============================================================
// Layer 2 — Application Layer
// ============================================================
// One use case per batch job. Each owns a config struct built
// from CLI arguments and orchestrates the lower layers in a
// fixed sequence of steps; no business logic lives in the CLI
// and no orchestration lives in the data layer.
//
// The three jobs are independent processes — they share record
// types and the subset file format, nothing else:
//
//   sample  → corpus JSON            → subset JSON
//   augment → subset JSON            → augmented subset JSON + images
//   ask     → image + questions .txt → session transcript .txt

/// Draw the seeded subset from the question corpus
pub mod sample_use_case;

/// Derive the deterministic image variants for a subset
pub mod augment_use_case;

/// Answer questions about one image with the pretrained model
pub mod ask_use_case;
