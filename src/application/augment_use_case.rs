// ============================================================
// Layer 2 — AugmentUseCase
// ============================================================
// Orchestrates the augmentation pipeline in order:
//
//   Step 1: Load the sampled subset       (Layer 4 - data)
//   Step 2: Per record, derive variants   (Layer 4 - data)
//   Step 3: Save the augmented subset     (Layer 4 - data)
//
// Error boundary: the only recoverable failure is opening or
// decoding a SOURCE image — that record is passed through alone
// and processing continues. Failing to encode or write an OUTPUT
// image (or the output JSON) is fatal; a half-written augmented
// dataset must not look like a finished one.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::data::{augment::Variant, dataset::SubsetDataset};
use crate::domain::record::VqaRecord;

// ─── Augmentation Configuration ──────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct AugmentConfig {
    pub subset_file:   PathBuf,
    pub augmented_dir: PathBuf,
    pub output_file:   PathBuf,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            subset_file:   PathBuf::from("gqa_dataset/processed/gqa_val_subset_1000.json"),
            augmented_dir: PathBuf::from("gqa_dataset/images_augmented"),
            output_file:   PathBuf::from("gqa_dataset/processed/gqa_val_subset_augmented.json"),
        }
    }
}

// ─── AugmentUseCase ───────────────────────────────────────────────────────────
pub struct AugmentUseCase {
    config: AugmentConfig,
}

impl AugmentUseCase {
    pub fn new(config: AugmentConfig) -> Self {
        Self { config }
    }

    /// Run the full augmentation pipeline and return the output path.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg = &self.config;
        let total_start = Instant::now();

        // ── Step 1: Load the preprocessed subset ──────────────────────────────
        tracing::info!("Loading preprocessed subset...");
        let subset = SubsetDataset::load(&cfg.subset_file)?;
        let total  = subset.records().len();
        tracing::info!("Loaded {} image-question pairs", total);

        fs::create_dir_all(&cfg.augmented_dir)
            .with_context(|| format!("Cannot create '{}'", cfg.augmented_dir.display()))?;

        // ── Step 2: Derive variants per record ────────────────────────────────
        let mut augmented: Vec<VqaRecord> = Vec::with_capacity(total * 4);
        let mut failures = 0usize;

        for (idx, record) in subset.records().iter().enumerate() {
            match image::open(&record.image_path) {
                Ok(img) => {
                    // The decoded image is normalised to RGB once so every
                    // variant (and its JPEG encoding) sees 3 channels.
                    let img = DynamicImage::ImageRgb8(img.to_rgb8());
                    self.push_variants(record, &img, &mut augmented)?;
                }
                Err(error) => {
                    // Recoverable: keep the untouched record, move on.
                    tracing::warn!(
                        "Error processing image {} ('{}'): {}",
                        idx + 1,
                        record.image_path,
                        error
                    );
                    augmented.push(record.clone());
                    failures += 1;
                }
            }

            let done = idx + 1;
            if done % 100 == 0 || done == total {
                tracing::info!(
                    "Processed {}/{} images... ({:.1}%)",
                    done,
                    total,
                    done as f64 / total as f64 * 100.0
                );
            }
        }

        // ── Step 3: Save the augmented subset ─────────────────────────────────
        tracing::info!("Saving augmented dataset...");
        let output_count = augmented.len();
        SubsetDataset::new(augmented).save(&cfg.output_file)?;

        tracing::info!(
            "Saved {} image-question pairs to '{}' ({} source images unreadable)",
            output_count,
            cfg.output_file.display(),
            failures
        );
        tracing::info!(
            "Total processing time: {:.2} seconds",
            total_start.elapsed().as_secs_f64()
        );

        Ok(cfg.output_file.clone())
    }

    /// Emit the original record followed by one record per variant,
    /// writing each variant's image file. Output-side failures abort.
    fn push_variants(
        &self,
        record: &VqaRecord,
        image:  &DynamicImage,
        out:    &mut Vec<VqaRecord>,
    ) -> Result<()> {
        // The original entry is kept as is — its image is not re-saved
        out.push(record.clone());

        for variant in Variant::ALL {
            let transformed = variant.apply(image);
            let file_name   = format!("{}_{}.jpg", record.image_id, variant.label());
            let image_path  = self.config.augmented_dir.join(&file_name);

            transformed.save(&image_path)
                .with_context(|| format!("Cannot write augmented image '{}'", image_path.display()))?;

            out.push(record.with_variant(variant.label(), &image_path));
        }
        Ok(())
    }
}
