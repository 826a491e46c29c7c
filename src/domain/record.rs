// ============================================================
// Layer 3 — VqaRecord Domain Type
// ============================================================
// Represents one image-question-answer triple in domain terms.
// This is the unit that flows through the whole pipeline:
//   - the subset extractor produces them from the raw corpus
//   - the augmenter reads them and derives per-variant copies
//   - serialized as a JSON array between the two stages
//
// An augmented copy keeps the same question and answer but gets
// derived identifiers: both question_id and image_id are suffixed
// with the variant name, and image_path points at the new file.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One sampled image-question-answer triple.
///
/// `image_path` is checked for existence when the record is created
/// by the subset extractor; downstream stages do not re-check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VqaRecord {
    /// Corpus key of the question this record was sampled from
    pub question_id: String,

    /// Identifier of the image the question refers to
    pub image_id: String,

    /// Path to the image file on disk
    pub image_path: String,

    /// The natural language question about the image
    pub question: String,

    /// The ground-truth answer from the corpus
    pub answer: String,
}

impl VqaRecord {
    /// Create a new VqaRecord
    pub fn new(
        question_id: impl Into<String>,
        image_id:    impl Into<String>,
        image_path:  impl Into<String>,
        question:    impl Into<String>,
        answer:      impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            image_id:    image_id.into(),
            image_path:  image_path.into(),
            question:    question.into(),
            answer:      answer.into(),
        }
    }

    /// Derive the record for one augmented copy of this record's image.
    ///
    /// Both identifiers gain a `_{variant}` suffix so augmented entries
    /// never collide with the originals, and the path is replaced with
    /// the freshly written image file.
    ///
    /// Example:
    ///   question_id "2123"   → "2123_rotated_90"
    ///   image_id    "n12345" → "n12345_rotated_90"
    pub fn with_variant(&self, variant: &str, image_path: &Path) -> Self {
        Self {
            question_id: format!("{}_{}", self.question_id, variant),
            image_id:    format!("{}_{}", self.image_id, variant),
            image_path:  image_path.display().to_string(),
            question:    self.question.clone(),
            answer:      self.answer.clone(),
        }
    }
}
