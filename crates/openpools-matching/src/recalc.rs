//! Weight recalculation for a single keyword profile.

use openpools_core::{CategoryWeights, Keyword};

use crate::merge::merge_with_stats;
use crate::normalize::NormalizeOptions;

/// Recompute every weight from `(category, source)` under `weights`.
///
/// This is a merge with an empty batch, so duplicates collapse and entries
/// that no longer normalize under `options` are dropped. Callers pass the
/// same options they ingest with, otherwise keywords accepted at ingestion
/// can disappear here. Applying it twice yields the same list as applying
/// it once.
pub fn recalculate(
    keywords: &[Keyword],
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> Vec<Keyword> {
    merge_with_stats(keywords, &[], weights, options).0
}
