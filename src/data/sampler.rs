// ============================================================
// Layer 4 — Seeded Subset Sampler
// ============================================================
// Draws a fixed-size uniform random sample, without replacement,
// from the list of qualifying records.
//
// Why a fixed seed?
//   The whole point of the subset is that experiments are
//   comparable across machines and across reruns. The same seed
//   over the same filtered record list must always yield the
//   same sample in the same order.
//
// Uses rand's index::sample which draws exactly `n` distinct
// indices uniformly — the standard without-replacement draw.
//
// Reference: rand crate documentation

use rand::{rngs::StdRng, SeedableRng};

use crate::domain::record::VqaRecord;

/// Draw `num_samples` records uniformly without replacement.
///
/// If fewer than `num_samples` records are available, all of them
/// are returned in their original order and a warning is logged —
/// a short corpus is not an error.
///
/// # Arguments
/// * `records`     - The qualifying records, in deterministic order
/// * `num_samples` - Target sample size
/// * `seed`        - RNG seed; same seed + same records ⇒ same sample
pub fn sample_subset(records: &[VqaRecord], num_samples: usize, seed: u64) -> Vec<VqaRecord> {
    if records.len() < num_samples {
        tracing::warn!(
            "Only {} pairs available, requested {}",
            records.len(),
            num_samples
        );
        return records.to_vec();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, records.len(), num_samples)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SEED: u64 = 42;

    fn test_records(count: usize) -> Vec<VqaRecord> {
        (0..count)
            .map(|i| {
                VqaRecord::new(
                    format!("q{i}"),
                    format!("img{i}"),
                    format!("images/img{i}.jpg"),
                    "What is this?",
                    "thing",
                )
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_sample_same_order() {
        let records = test_records(100);
        let a = sample_subset(&records, 10, TEST_SEED);
        let b = sample_subset(&records, 10, TEST_SEED);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_sample() {
        let records = test_records(100);
        let a = sample_subset(&records, 10, TEST_SEED);
        let b = sample_subset(&records, 10, TEST_SEED + 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let records = test_records(50);
        let sample  = sample_subset(&records, 50, TEST_SEED);
        let mut ids: Vec<_> = sample.iter().map(|r| r.question_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_short_corpus_returns_everything() {
        // 3 records but 10 requested → all 3, original order, no error
        let records = test_records(3);
        let sample  = sample_subset(&records, 10, TEST_SEED);
        assert_eq!(sample, records);
    }

    #[test]
    fn test_sample_size_is_min_of_requested_and_available() {
        let records = test_records(20);
        assert_eq!(sample_subset(&records, 5, TEST_SEED).len(), 5);
        assert_eq!(sample_subset(&records, 20, TEST_SEED).len(), 20);
        assert_eq!(sample_subset(&records, 200, TEST_SEED).len(), 20);
    }

    #[test]
    fn test_single_entry_corpus_trivial_sample() {
        let records = test_records(1);
        let sample  = sample_subset(&records, 1, TEST_SEED);
        assert_eq!(sample, records);
    }
}
