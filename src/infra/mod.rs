// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns that don't belong in any
// specific business layer:
//
//   checkpoint.rs      — Loading the pretrained model artifacts
//                        (config, weights, answer vocabulary)
//                        via Burn's CompactRecorder.
//
//   tokenizer_store.rs — Loading the tokenizer paired with the
//                        checkpoint.
//
//   session_log.rs     — Writing the per-run session transcript
//                        to a timestamped history file.

/// Pretrained model artifact loading
pub mod checkpoint;

/// Tokenizer persistence
pub mod tokenizer_store;

/// Timestamped session transcript files
pub mod session_log;
