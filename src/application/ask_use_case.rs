// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// One inference session: load the model stack once, answer every
// question in the questions file against one image, and write the
// transcript to a timestamped session file.
//
//   Step 1: Validate all inputs          (before anything is written)
//   Step 2: Select device, load model    (Layer 5/6, once per run)
//   Step 3: Preprocess the image         (Layer 5, once per run)
//   Step 4: Answer questions in order    (Layer 5, one pass each)
//   Step 5: Save the session transcript  (Layer 6)
//
// A failed forward pass is NOT caught — it aborts the run and no
// session file is written. A half-answered transcript would be
// indistinguishable from a finished one in the history directory.

use anyhow::{bail, Result};
use burn::prelude::*;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::data::questions::load_questions;
use crate::domain::traits::QuestionAnswerer;
use crate::domain::transcript::SessionTranscript;
use crate::infra::{checkpoint::CheckpointManager, session_log::SessionLogger, tokenizer_store::TokenizerStore};
use crate::ml::inferencer::{select_device, InferBackend, VqaInferencer};
use crate::ml::vision::{load_session_image, to_model_input};

// ─── Session Configuration ───────────────────────────────────────────────────
// The model directory arrives here from the CLI like every other
// path — it is configuration, not a constant baked into the code.
#[derive(Debug, Clone)]
pub struct AskConfig {
    pub image_path:     PathBuf,
    pub questions_file: PathBuf,
    pub output_dir:     PathBuf,
    pub model_dir:      PathBuf,
}

// ─── VqaSession ───────────────────────────────────────────────────────────────
/// One loaded model bound to one preprocessed image.
/// Implements the QuestionAnswerer trait from Layer 3.
struct VqaSession {
    inferencer: VqaInferencer,
    tokenizer:  Tokenizer,
    image:      Tensor<InferBackend, 4>,
}

impl QuestionAnswerer for VqaSession {
    fn answer(&self, question: &str) -> Result<(String, f32)> {
        self.inferencer.predict(&self.image, question, &self.tokenizer)
    }
}

// ─── AskUseCase ───────────────────────────────────────────────────────────────
pub struct AskUseCase {
    config: AskConfig,
}

impl AskUseCase {
    pub fn new(config: AskConfig) -> Self {
        Self { config }
    }

    /// Run the full session and return the session file path.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg = &self.config;

        // ── Step 1: Validate inputs ───────────────────────────────────────────
        if !cfg.image_path.exists() {
            bail!("Image path '{}' does not exist", cfg.image_path.display());
        }
        if !cfg.questions_file.exists() {
            bail!("Questions file '{}' does not exist", cfg.questions_file.display());
        }
        let ckpt_manager = CheckpointManager::new(&cfg.model_dir);
        ckpt_manager.validate()?;

        // ── Step 2: Device and model stack, loaded once ───────────────────────
        let device = select_device();
        tracing::info!("Loading processor and model from '{}'...", cfg.model_dir.display());
        let tokenizer  = TokenizerStore::new(&cfg.model_dir).load()?;
        let inferencer = VqaInferencer::from_checkpoint(&ckpt_manager, device)?;

        // ── Step 3: Preprocess the image once ─────────────────────────────────
        let rgb   = load_session_image(&cfg.image_path, inferencer.image_size())?;
        let image = to_model_input::<InferBackend>(rgb, inferencer.device());

        let image_name = cfg.image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        // ── Step 4: Answer each question with an independent pass ─────────────
        let questions = load_questions(&cfg.questions_file)?;
        println!("Processing image: {image_name}");

        let session = VqaSession { inferencer, tokenizer, image };
        let mut transcript = SessionTranscript::new(&image_name);

        for question in &questions {
            // Errors here propagate: the run aborts with no partial transcript
            let (answer, confidence) = session.answer(question)?;
            println!("Question: {question}, Answer: {answer}, Confidence: {confidence:.4}");
            transcript.record(question, answer, confidence);
        }

        if transcript.is_empty() {
            println!("No questions were provided.");
        }

        // ── Step 5: Save the session transcript ───────────────────────────────
        let logger = SessionLogger::new(&cfg.output_dir)?;
        logger.save(&transcript)
    }
}
