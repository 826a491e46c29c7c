// ============================================================
// Layer 3 — Session Transcript Domain Type
// ============================================================
// The transcript of one inference session: which image was asked
// about, and an ordered list of (question, answer, confidence)
// turns. It is a write-only artifact — nothing ever reads a
// session file back — so the block format below is the contract:
//
//   Image: <name>
//   <blank line>
//   Question: <q>
//   Answer: <a>
//   Confidence: <c to 4 decimal places>
//   <blank line>
//   ... repeated per question ...
//
// An empty session gets a placeholder block instead of turns.

use std::fmt::Write;

/// One answered question within a session.
#[derive(Debug, Clone)]
pub struct QaTurn {
    /// The question as asked (already normalised to end with '?')
    pub question: String,

    /// The answer label the model chose
    pub answer: String,

    /// Normalised probability of the chosen label, in (0, 1]
    pub confidence: f32,
}

/// The full transcript of one inference run against one image.
#[derive(Debug, Clone)]
pub struct SessionTranscript {
    image_name: String,
    turns:      Vec<QaTurn>,
}

impl SessionTranscript {
    /// Start an empty transcript for the given image file name
    pub fn new(image_name: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            turns:      Vec::new(),
        }
    }

    /// Append one answered question, preserving input order
    pub fn record(&mut self, question: impl Into<String>, answer: impl Into<String>, confidence: f32) {
        self.turns.push(QaTurn {
            question:   question.into(),
            answer:     answer.into(),
            confidence,
        });
    }

    pub fn turns(&self) -> &[QaTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Render the transcript in the fixed session-file block format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // write! into a String cannot fail, so the results are ignored
        let _ = writeln!(out, "Image: {}", self.image_name);
        let _ = writeln!(out);

        if self.turns.is_empty() {
            let _ = writeln!(out, "No questions were provided.");
            return out;
        }

        for turn in &self.turns {
            let _ = writeln!(out, "Question: {}", turn.question);
            let _ = writeln!(out, "Answer: {}", turn.answer);
            let _ = writeln!(out, "Confidence: {:.4}", turn.confidence);
            let _ = writeln!(out);
        }
        out
    }
}
