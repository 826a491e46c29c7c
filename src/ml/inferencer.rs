// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{ensure, Context, Result};
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::ViltVqaModel;

pub type InferBackend = burn::backend::Wgpu;
pub type InferDevice  = burn::backend::wgpu::WgpuDevice;

// BERT-convention special token ids, matching the tokenizer
// shipped in the model directory
const CLS_ID: u32 = 101;
const SEP_ID: u32 = 102;
const PAD_ID: u32 = 0;

/// Pick the compute device for this run.
/// wgpu resolves its default device to the best available adapter —
/// a discrete GPU when one is present, the fallback adapter otherwise.
pub fn select_device() -> InferDevice {
    let device = InferDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    device
}

pub struct VqaInferencer {
    model:        ViltVqaModel<InferBackend>,
    labels:       Vec<String>,
    max_text_len: usize,
    image_size:   u32,
    device:       InferDevice,
}

impl VqaInferencer {
    /// Load the full model stack from a pretrained checkpoint directory:
    /// architecture config, weights, and the answer vocabulary.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: InferDevice) -> Result<Self> {
        let cfg    = ckpt_manager.load_config()?;
        let labels = ckpt_manager.load_answer_vocab()?;
        ensure!(
            labels.len() == cfg.num_answers,
            "Answer vocabulary has {} labels but the model config expects {}",
            labels.len(),
            cfg.num_answers
        );

        let model: ViltVqaModel<InferBackend> = cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!(
            "Model loaded: {} layers, d_model={}, {} answer classes",
            cfg.num_layers,
            cfg.d_model,
            cfg.num_answers
        );
        Ok(Self {
            model,
            labels,
            max_text_len: cfg.max_text_len,
            image_size:   cfg.image_size as u32,
            device,
        })
    }

    /// Side length the session image must be resized to.
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    pub fn device(&self) -> &InferDevice {
        &self.device
    }

    /// Answer one question about the (already preprocessed) image.
    ///
    /// One independent forward pass per call — no state is shared
    /// between questions. Returns the arg-max answer label and its
    /// softmax probability as the confidence.
    pub fn predict(
        &self,
        image:     &Tensor<InferBackend, 4>,
        question:  &str,
        tokenizer: &Tokenizer,
    ) -> Result<(String, f32)> {
        // Build [CLS] question [SEP], padded to the trained text length
        let enc = tokenizer.encode(question, false)
            .map_err(|e| anyhow::anyhow!("Tokenise: {e}"))?;

        let mut input_ids: Vec<u32> = vec![CLS_ID];
        input_ids.extend_from_slice(enc.get_ids());
        input_ids.push(SEP_ID);
        input_ids.truncate(self.max_text_len);
        while input_ids.len() < self.max_text_len { input_ids.push(PAD_ID); }

        // Forward pass
        let input_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let input_tensor = Tensor::<InferBackend, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).unsqueeze::<2>();

        let logits = self.model.forward(image.clone(), input_tensor); // [1, num_answers]

        // Softmax probabilities, scanned on the host for the arg-max
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read probabilities back from device: {e:?}"))?;

        let mut best_idx  = 0usize;
        let mut best_prob = f32::NEG_INFINITY;
        for (idx, &prob) in probs.iter().enumerate() {
            if prob > best_prob {
                best_prob = prob;
                best_idx  = idx;
            }
        }

        let answer = self.labels.get(best_idx)
            .with_context(|| {
                format!("Class {best_idx} has no label in the {}-entry answer vocabulary",
                    self.labels.len())
            })?;

        tracing::debug!("class={} conf={:.4} answer='{}'", best_idx, best_prob, answer);

        Ok((answer.clone(), best_prob))
    }
}
