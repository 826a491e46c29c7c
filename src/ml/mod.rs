// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// (and the infra checkpoint loader, which pairs with it).
//
// What's in this layer:
//
//   model.rs      — The ViLT-style VQA classifier
//                   Single-stream transformer over text tokens
//                   and image patches:
//                   • Conv2d patch embedding (kernel = stride)
//                   • Token / position / modality embeddings
//                   • Multi-head self-attention encoder blocks
//                   • tanh pooler over [CLS] + classifier head
//
//   vision.rs     — Session-image preprocessing
//                   Exact-square Lanczos3 resize, RGB8, and
//                   conversion to a [-1, 1] channels-first tensor
//
//   inferencer.rs — The inference engine
//                   Loads a checkpoint, tokenises one question,
//                   runs one forward pass, and reads the arg-max
//                   answer with its softmax confidence
//
// Reference: Burn Book §3 (Building Blocks)
//            Kim et al. (2021) ViLT
//            Vaswani et al. (2017) Attention Is All You Need

/// ViLT-style VQA classifier architecture
pub mod model;

/// Image → model-input tensor conversion
pub mod vision;

/// Inference engine — loads checkpoint and answers questions
pub mod inferencer;
