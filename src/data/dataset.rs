// ============================================================
// Layer 4 — Subset Dataset
// ============================================================
// The materialised subset: a flat, ordered list of VqaRecords,
// serialized as a single pretty-printed JSON array. Both the
// sampled subset and the augmented subset use this same shape,
// so one type covers both files.
//
// Implements Burn's Dataset trait so downstream experiment code
// can index the subset the same way it indexes any other dataset.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::{Context, Result};
use burn::data::dataset::Dataset;
use std::{fs, path::Path};

use crate::domain::record::VqaRecord;

pub struct SubsetDataset {
    records: Vec<VqaRecord>,
}

impl SubsetDataset {
    pub fn new(records: Vec<VqaRecord>) -> Self {
        Self { records }
    }

    /// Load a subset file written by a previous pipeline stage.
    /// A missing or unparsable file is fatal — there is nothing
    /// sensible to do without the input subset.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read subset file '{}'", path.display()))?;
        let records: Vec<VqaRecord> = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid subset array", path.display()))?;
        Ok(Self { records })
    }

    /// Write the records as one pretty-printed JSON array,
    /// creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write subset to '{}'", path.display()))?;
        Ok(())
    }

    pub fn records(&self) -> &[VqaRecord] {
        &self.records
    }
}

impl Dataset<VqaRecord> for SubsetDataset {
    fn get(&self, index: usize) -> Option<VqaRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str) -> VqaRecord {
        VqaRecord::new(id, "img", "images/img.jpg", "What?", "that")
    }

    #[test]
    fn test_save_then_load_preserves_records_and_order() {
        let dir  = TempDir::new().unwrap();
        let path = dir.path().join("processed/subset.json");

        let dataset = SubsetDataset::new(vec![record("b"), record("a")]);
        dataset.save(&path).unwrap();

        let loaded = SubsetDataset::load(&path).unwrap();
        assert_eq!(loaded.records(), dataset.records());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir  = TempDir::new().unwrap();
        let path = dir.path().join("deeply/nested/subset.json");
        SubsetDataset::new(vec![record("x")]).save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_dataset_trait_get_and_len() {
        let dataset = SubsetDataset::new(vec![record("a"), record("b")]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(1).unwrap().question_id, "b");
        assert!(dataset.get(2).is_none());
    }

    #[test]
    fn test_missing_subset_file_is_fatal() {
        assert!(SubsetDataset::load(Path::new("/nonexistent/subset.json")).is_err());
    }
}
