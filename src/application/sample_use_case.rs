// ============================================================
// Layer 2 — SampleUseCase
// ============================================================
// Orchestrates the subset extraction pipeline in order:
//
//   Step 1: Load + filter the corpus   (Layer 4 - data)
//   Step 2: Draw the seeded sample     (Layer 4 - data)
//   Step 3: Save the subset JSON       (Layer 4 - data)
//
// The output of this use case is the input of the augmenter, so
// the record order written here is load-bearing downstream.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use crate::data::{
    corpus::JsonCorpusLoader,
    dataset::SubsetDataset,
    sampler::sample_subset,
};
use crate::domain::traits::CorpusSource;

// ─── Sampling Configuration ──────────────────────────────────────────────────
// Every path and tunable the extraction needs, resolved from CLI
// arguments at startup — nothing is read from ambient globals.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub corpus_file: PathBuf,
    pub images_dir:  PathBuf,
    pub output_file: PathBuf,
    pub num_samples: usize,
    pub seed:        u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            corpus_file: PathBuf::from("gqa_dataset/questions/val_all_questions.json"),
            images_dir:  PathBuf::from("gqa_dataset/images"),
            output_file: PathBuf::from("gqa_dataset/processed/gqa_val_subset_1000.json"),
            num_samples: 1000,
            seed:        42,
        }
    }
}

// ─── SampleUseCase ────────────────────────────────────────────────────────────
pub struct SampleUseCase {
    config: SampleConfig,
}

impl SampleUseCase {
    pub fn new(config: SampleConfig) -> Self {
        Self { config }
    }

    /// Run the full extraction pipeline and return the subset path.
    pub fn execute(&self) -> Result<PathBuf> {
        let cfg = &self.config;
        let total_start = Instant::now();

        // ── Step 1: Load and filter the corpus ────────────────────────────────
        tracing::info!("Loading validation questions...");
        let load_start = Instant::now();
        let loader  = JsonCorpusLoader::new(&cfg.corpus_file, &cfg.images_dir);
        let records = loader.load_all()?;
        tracing::info!(
            "Extracted {} valid pairs in {:.2} seconds",
            records.len(),
            load_start.elapsed().as_secs_f64()
        );

        // ── Step 2: Draw the sample ───────────────────────────────────────────
        tracing::info!("Sampling subset...");
        let sampled = sample_subset(&records, cfg.num_samples, cfg.seed);
        tracing::info!("Sampled {} pairs", sampled.len());

        // ── Step 3: Save the subset ───────────────────────────────────────────
        let sample_count = sampled.len();
        SubsetDataset::new(sampled).save(&cfg.output_file)?;
        tracing::info!(
            "Saved {} image-question pairs to '{}'",
            sample_count,
            cfg.output_file.display()
        );
        tracing::info!(
            "Total processing time: {:.2} seconds",
            total_start.elapsed().as_secs_f64()
        );

        Ok(cfg.output_file.clone())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Full fixture: corpus JSON + images dir with the listed ids on disk.
    fn fixture(corpus_json: &str, images: &[&str], num_samples: usize) -> (TempDir, SampleConfig) {
        let dir = TempDir::new().unwrap();
        let corpus_file = dir.path().join("questions.json");
        fs::write(&corpus_file, corpus_json).unwrap();

        let images_dir = dir.path().join("images");
        fs::create_dir(&images_dir).unwrap();
        for id in images {
            fs::write(images_dir.join(format!("{id}.jpg")), b"jpg").unwrap();
        }

        let config = SampleConfig {
            corpus_file,
            images_dir,
            output_file: dir.path().join("processed/subset.json"),
            num_samples,
            seed: 42,
        };
        (dir, config)
    }

    #[test]
    fn test_single_entry_corpus_yields_that_entry() {
        let (_dir, config) = fixture(
            r#"{"q1": {"imageId": "a", "question": "Is it a?", "answer": "yes"}}"#,
            &["a"],
            1,
        );
        let path = SampleUseCase::new(config).execute().unwrap();

        let subset = SubsetDataset::load(&path).unwrap();
        assert_eq!(subset.records().len(), 1);
        let record = &subset.records()[0];
        assert_eq!(record.question_id, "q1");
        assert_eq!(record.image_id, "a");
        assert_eq!(record.question, "Is it a?");
        assert_eq!(record.answer, "yes");
        assert!(PathBuf::from(&record.image_path).exists());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let corpus: String = {
            let entries: Vec<String> = (0..30)
                .map(|i| {
                    format!(
                        r#""q{i}": {{"imageId": "img{i}", "question": "What is {i}?", "answer": "{i}"}}"#
                    )
                })
                .collect();
            format!("{{{}}}", entries.join(","))
        };
        let ids: Vec<String> = (0..30).map(|i| format!("img{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();

        let (_dir, config) = fixture(&corpus, &id_refs, 10);
        let use_case = SampleUseCase::new(config.clone());

        let first  = SubsetDataset::load(&use_case.execute().unwrap()).unwrap();
        let second = SubsetDataset::load(&SampleUseCase::new(config).execute().unwrap()).unwrap();
        assert_eq!(first.records(), second.records());
        assert_eq!(first.records().len(), 10);
    }

    #[test]
    fn test_missing_corpus_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = SampleConfig {
            corpus_file: dir.path().join("missing.json"),
            images_dir:  dir.path().to_path_buf(),
            output_file: dir.path().join("subset.json"),
            num_samples: 10,
            seed: 42,
        };
        assert!(SampleUseCase::new(config).execute().is_err());
    }
}
