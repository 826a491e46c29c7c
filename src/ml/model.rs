use burn::{
    nn::{
        attention::{MultiHeadAttention, MultiHeadAttentionConfig},
        conv::{Conv2d, Conv2dConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
// The same JSON shape is stored as model_config.json in the model directory.
#[derive(Config, Debug)]
pub struct ViltVqaConfig {
    pub vocab_size:   usize,
    pub max_text_len: usize,
    pub image_size:   usize,
    pub patch_size:   usize,
    pub d_model:      usize,
    pub num_heads:    usize,
    pub num_layers:   usize,
    pub d_ff:         usize,
    pub dropout:      f64,
    pub num_answers:  usize,
}

impl ViltVqaConfig {
    /// Number of image patches the patch embedding produces.
    /// image_size must be an exact multiple of patch_size.
    pub fn num_patches(&self) -> usize {
        let per_side = self.image_size / self.patch_size;
        per_side * per_side
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> ViltVqaModel<B> {
        // One conv with kernel = stride = patch size turns the image
        // into a grid of non-overlapping patch embeddings.
        let patch_embedding = Conv2dConfig::new([3, self.d_model], [self.patch_size, self.patch_size])
            .with_stride([self.patch_size, self.patch_size])
            .init(device);
        let token_embedding          = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let text_position_embedding  = EmbeddingConfig::new(self.max_text_len, self.d_model).init(device);
        let patch_position_embedding = EmbeddingConfig::new(self.num_patches(), self.d_model).init(device);
        // Two modality slots: 0 = text token, 1 = image patch
        let modality_embedding       = EmbeddingConfig::new(2, self.d_model).init(device);
        let layers: Vec<EncoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_encoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let pooler     = LinearConfig::new(self.d_model, self.d_model).init(device);
        let classifier = LinearConfig::new(self.d_model, self.num_answers).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        ViltVqaModel {
            patch_embedding,
            token_embedding, text_position_embedding,
            patch_position_embedding, modality_embedding,
            layers, final_norm, pooler, classifier, dropout,
            d_model: self.d_model,
        }
    }

    fn build_encoder_block<B: Backend>(&self, device: &B::Device) -> EncoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1   = LayerNormConfig::new(self.d_model).init(device);
        let norm2   = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        EncoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> EncoderBlock<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        use burn::nn::attention::MhaInput;
        let attn_output = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

/// Single-stream ViLT-style VQA classifier: text tokens and image
/// patches share one transformer encoder, and a classifier head over
/// the pooled [CLS] state picks an answer from a fixed vocabulary.
#[derive(Module, Debug)]
pub struct ViltVqaModel<B: Backend> {
    pub patch_embedding:          Conv2d<B>,
    pub token_embedding:          Embedding<B>,
    pub text_position_embedding:  Embedding<B>,
    pub patch_position_embedding: Embedding<B>,
    pub modality_embedding:       Embedding<B>,
    pub layers:                   Vec<EncoderBlock<B>>,
    pub final_norm:               LayerNorm<B>,
    pub pooler:                   Linear<B>,
    pub classifier:               Linear<B>,
    pub dropout:                  Dropout,
    pub d_model:                  usize,
}

impl<B: Backend> ViltVqaModel<B> {
    /// images: [batch, 3, H, W], input_ids: [batch, text_len]
    /// → answer logits: [batch, num_answers]
    pub fn forward(&self, images: Tensor<B, 4>, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, text_len] = input_ids.dims();
        let device = input_ids.device();

        // ── Text embeddings ───────────────────────────────────────────────────
        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant, so position must be injected explicitly.
        let text_positions = Tensor::<B, 1, Int>::arange(0..text_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, text_len]);
        let text_types = Tensor::<B, 2, Int>::zeros([batch_size, text_len], &device);

        let text = tok_emb
            + self.text_position_embedding.forward(text_positions)
            + self.modality_embedding.forward(text_types);

        // ── Patch embeddings ──────────────────────────────────────────────────
        let patches = self.patch_embedding.forward(images); // [batch, d_model, grid_h, grid_w]
        let [_, _, grid_h, grid_w] = patches.dims();
        let num_patches = grid_h * grid_w;
        let patch_emb = patches
            .reshape([batch_size, self.d_model, num_patches])
            .swap_dims(1, 2); // [batch, num_patches, d_model]

        let patch_positions = Tensor::<B, 1, Int>::arange(0..num_patches as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, num_patches]);
        let patch_types = Tensor::<B, 2, Int>::ones([batch_size, num_patches], &device);

        let image_emb = patch_emb
            + self.patch_position_embedding.forward(patch_positions)
            + self.modality_embedding.forward(patch_types);

        // ── Joint encoder over [text tokens | image patches] ──────────────────
        let mut x = self.dropout.forward(Tensor::cat(vec![text, image_emb], 1));
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let x = self.final_norm.forward(x); // [batch, text_len + num_patches, d_model]

        // Pooled state = [CLS] position (text position 0) through a tanh pooler.
        let pooled = x
            .slice([0..batch_size, 0..1, 0..self.d_model])
            .reshape([batch_size, self.d_model]);
        let pooled = self.pooler.forward(pooled).tanh();

        self.classifier.forward(pooled) // [batch, num_answers]
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ViltVqaConfig {
        ViltVqaConfig::new(100, 8, 64, 16, 32, 4, 2, 64, 0.0, 10)
    }

    #[test]
    fn test_patch_count_from_geometry() {
        // 64 / 16 = 4 per side → 16 patches
        assert_eq!(small_config().num_patches(), 16);
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg  = small_config();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ViltVqaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.d_model, cfg.d_model);
        assert_eq!(back.num_answers, cfg.num_answers);
        assert_eq!(back.num_patches(), cfg.num_patches());
    }
}
