// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `sample`, `augment` and `ask`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, PathBuf, etc.)
//
// Defaults follow the conventional dataset layout rooted at the
// working directory, so a bare `sample` / `augment` works in a
// checked-out experiment tree.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::ask_use_case::AskConfig;
use crate::application::augment_use_case::AugmentConfig;
use crate::application::sample_use_case::SampleConfig;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample a reproducible subset of image-question pairs from the corpus
    Sample(SampleArgs),

    /// Generate augmented image variants for a sampled subset
    Augment(AugmentArgs),

    /// Answer questions about an image using the fine-tuned model
    Ask(AskArgs),
}

/// All arguments for the `sample` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Corpus JSON file mapping question id → {imageId, question, answer}
    #[arg(long, default_value = "gqa_dataset/questions/val_all_questions.json")]
    pub corpus_file: PathBuf,

    /// Directory containing {imageId}.jpg files
    #[arg(long, default_value = "gqa_dataset/images")]
    pub images_dir: PathBuf,

    /// Where to write the sampled subset.
    /// Defaults to gqa_dataset/processed/gqa_val_subset_<num-samples>.json
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Number of image-question pairs to sample
    #[arg(long, default_value_t = 1000)]
    pub num_samples: usize,

    /// Random seed — the same seed over the same corpus
    /// always produces the same subset
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI SampleArgs into the application-layer SampleConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<SampleArgs> for SampleConfig {
    fn from(a: SampleArgs) -> Self {
        let output_file = a.output_file.unwrap_or_else(|| {
            PathBuf::from(format!(
                "gqa_dataset/processed/gqa_val_subset_{}.json",
                a.num_samples
            ))
        });
        SampleConfig {
            corpus_file: a.corpus_file,
            images_dir:  a.images_dir,
            output_file,
            num_samples: a.num_samples,
            seed:        a.seed,
        }
    }
}

/// All arguments for the `augment` command
#[derive(Args, Debug)]
pub struct AugmentArgs {
    /// Subset file produced by the `sample` command
    #[arg(long, default_value = "gqa_dataset/processed/gqa_val_subset_1000.json")]
    pub subset_file: PathBuf,

    /// Directory to write the augmented image files into
    #[arg(long, default_value = "gqa_dataset/images_augmented")]
    pub augmented_dir: PathBuf,

    /// Where to write the augmented subset
    #[arg(long, default_value = "gqa_dataset/processed/gqa_val_subset_augmented.json")]
    pub output_file: PathBuf,
}

impl From<AugmentArgs> for AugmentConfig {
    fn from(a: AugmentArgs) -> Self {
        AugmentConfig {
            subset_file:   a.subset_file,
            augmented_dir: a.augmented_dir,
            output_file:   a.output_file,
        }
    }
}

/// All arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Path to the image file to ask about
    #[arg(long)]
    pub image_path: PathBuf,

    /// Plain-text file with one question per line
    #[arg(long)]
    pub questions_file: PathBuf,

    /// Directory to save session logs
    #[arg(long, default_value = "./vqa_history")]
    pub output_dir: PathBuf,

    /// Directory holding the fine-tuned model artifacts
    /// (model_config.json, model.mpk.gz, answer_vocab.json, tokenizer.json)
    #[arg(long, default_value = "gqa_dataset/finetuned_model")]
    pub model_dir: PathBuf,
}

impl From<AskArgs> for AskConfig {
    fn from(a: AskArgs) -> Self {
        AskConfig {
            image_path:     a.image_path,
            questions_file: a.questions_file,
            output_dir:     a.output_dir,
            model_dir:      a.model_dir,
        }
    }
}
