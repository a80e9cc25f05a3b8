//! Keyword merge engine.
//!
//! Folds a freshly extracted batch into a user's stored keyword list.
//! Keywords are identified by their normalized text; on collision the entry
//! with the higher recomputed weight survives and an equal weight lets the
//! incoming entry replace the stored one. Stored keywords absent from the
//! batch are always kept.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use openpools_core::{CategoryWeights, Keyword};

use crate::normalize::{normalize_keyword, NormalizeOptions};

/// Counters describing what a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Keywords not previously in the profile.
    pub added: usize,
    /// Stored keywords replaced by an incoming entry with a different
    /// category or source.
    pub upgraded: usize,
    /// Incoming keywords that left the stored entry as it was.
    pub unchanged: usize,
    /// Entries (stored or incoming) dropped by normalization.
    pub skipped: usize,
}

/// Merge `incoming` into `existing`.
pub fn merge(existing: &[Keyword], incoming: &[Keyword], weights: &CategoryWeights) -> Vec<Keyword> {
    merge_with_stats(existing, incoming, weights, &NormalizeOptions::default()).0
}

/// Merge `incoming` into `existing`, reporting what changed.
///
/// Stored keywords keep their positions; new keywords are appended in
/// arrival order. Every surviving weight is recomputed from its
/// `(category, source)` pair.
pub fn merge_with_stats(
    existing: &[Keyword],
    incoming: &[Keyword],
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> (Vec<Keyword>, MergeStats) {
    let mut stats = MergeStats::default();
    let mut merged: Vec<Keyword> = Vec::with_capacity(existing.len() + incoming.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(existing.len());

    for keyword in existing {
        let Some(keyword) = normalize_keyword(keyword, weights, options) else {
            stats.skipped += 1;
            continue;
        };
        match index.get(&keyword.keyword) {
            Some(&i) => {
                if keyword.weight >= merged[i].weight {
                    merged[i] = keyword;
                }
            }
            None => {
                index.insert(keyword.keyword.clone(), merged.len());
                merged.push(keyword);
            }
        }
    }

    for keyword in incoming {
        let Some(keyword) = normalize_keyword(keyword, weights, options) else {
            stats.skipped += 1;
            continue;
        };
        match index.get(&keyword.keyword) {
            Some(&i) => {
                let current = &merged[i];
                if keyword.weight >= current.weight {
                    if keyword.category != current.category || keyword.source != current.source {
                        stats.upgraded += 1;
                    } else {
                        stats.unchanged += 1;
                    }
                    merged[i] = keyword;
                } else {
                    stats.unchanged += 1;
                }
            }
            None => {
                index.insert(keyword.keyword.clone(), merged.len());
                merged.push(keyword);
                stats.added += 1;
            }
        }
    }

    if stats.skipped > 0 {
        warn!(
            subsystem = "matching",
            component = "merge",
            skipped_count = stats.skipped,
            "Skipped malformed keywords during merge"
        );
    }

    debug!(
        subsystem = "matching",
        component = "merge",
        existing = existing.len(),
        incoming = incoming.len(),
        keyword_count = merged.len(),
        added = stats.added,
        upgraded = stats.upgraded,
        "Keyword merge complete"
    );

    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpools_core::{Category, Source};
    use std::collections::HashSet;

    fn kw(table: &CategoryWeights, text: &str, category: Category, source: Source) -> Keyword {
        table.keyword(text, category, source)
    }

    fn texts(keywords: &[Keyword]) -> HashSet<String> {
        keywords.iter().map(|k| k.keyword.clone()).collect()
    }

    #[test]
    fn test_merge_with_empty_incoming_preserves_existing() {
        let table = CategoryWeights::default();
        let existing = vec![
            kw(&table, "python", Category::Skills, Source::Resume),
            kw(&table, "figma", Category::Tools, Source::Resume),
        ];
        let merged = merge(&existing, &[], &table);
        assert_eq!(texts(&merged), texts(&existing));
    }

    #[test]
    fn test_merge_into_empty_dedups_incoming() {
        let table = CategoryWeights::default();
        let incoming = vec![
            kw(&table, "Python", Category::Skills, Source::Github),
            kw(&table, "python ", Category::Skills, Source::Resume),
            kw(&table, "rust", Category::Skills, Source::Github),
        ];
        let merged = merge(&[], &incoming, &table);
        assert_eq!(merged.len(), 2);
        let python = merged.iter().find(|k| k.keyword == "python").unwrap();
        assert_eq!(python.source, Source::Resume);
        assert_eq!(python.weight, 1.0);
    }

    #[test]
    fn test_merge_reingestion_does_not_grow() {
        let table = CategoryWeights::default();
        let existing = vec![
            kw(&table, "python", Category::Skills, Source::Resume),
            kw(&table, "aws", Category::Technologies, Source::Linkedin),
        ];
        let (merged, stats) =
            merge_with_stats(&existing, &existing, &table, &NormalizeOptions::default());
        assert_eq!(merged.len(), existing.len());
        assert_eq!(stats.added, 0);
        assert_eq!(stats.unchanged, 2);
    }

    #[test]
    fn test_merge_keeps_higher_weight() {
        let table = CategoryWeights::default();
        let existing = vec![kw(&table, "python", Category::Skills, Source::Resume)];
        let incoming = vec![kw(&table, "python", Category::Skills, Source::Github)];
        let (merged, stats) =
            merge_with_stats(&existing, &incoming, &table, &NormalizeOptions::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::Resume);
        assert_eq!(stats.unchanged, 1);
        assert_eq!(stats.upgraded, 0);
    }

    #[test]
    fn test_merge_upgrades_to_higher_weight() {
        let table = CategoryWeights::default();
        let existing = vec![kw(&table, "python", Category::Roles, Source::Github)];
        let incoming = vec![kw(&table, "Python", Category::Skills, Source::Linkedin)];
        let (merged, stats) =
            merge_with_stats(&existing, &incoming, &table, &NormalizeOptions::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].category, Category::Skills);
        assert_eq!(merged[0].source, Source::Linkedin);
        assert_eq!(merged[0].weight, 0.95);
        assert_eq!(stats.upgraded, 1);
    }

    #[test]
    fn test_merge_tie_prefers_incoming() {
        let table = CategoryWeights::default();
        let existing = vec![kw(&table, "python", Category::Skills, Source::Pdf)];
        let incoming = vec![kw(&table, "python", Category::Skills, Source::Resume)];
        let merged = merge(&existing, &incoming, &table);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::Resume);
    }

    #[test]
    fn test_merge_recomputes_stale_weights() {
        let table = CategoryWeights::default();
        let mut stale = kw(&table, "python", Category::Skills, Source::Resume);
        stale.weight = 0.1;
        let merged = merge(&[stale], &[], &table);
        assert_eq!(merged[0].weight, 1.0);
    }

    #[test]
    fn test_merge_count_equals_unique_texts() {
        let table = CategoryWeights::default();
        let existing = vec![
            kw(&table, "python", Category::Skills, Source::Resume),
            kw(&table, "sql", Category::Skills, Source::Resume),
        ];
        let incoming = vec![
            kw(&table, "SQL", Category::Technologies, Source::Linkedin),
            kw(&table, "terraform", Category::Tools, Source::Github),
        ];
        let merged = merge(&existing, &incoming, &table);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].keyword, "python");
        assert_eq!(merged[1].keyword, "sql");
        assert_eq!(merged[2].keyword, "terraform");
    }

    #[test]
    fn test_merge_skips_malformed() {
        let table = CategoryWeights::default();
        let existing = vec![kw(&table, "python", Category::Skills, Source::Resume)];
        let incoming = vec![
            kw(&table, " ", Category::Skills, Source::Resume),
            kw(&table, "r", Category::Skills, Source::Resume),
        ];
        let (merged, stats) =
            merge_with_stats(&existing, &incoming, &table, &NormalizeOptions::default());
        assert_eq!(merged.len(), 1);
        assert_eq!(stats.skipped, 2);
    }
}
