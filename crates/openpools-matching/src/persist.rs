//! Match persistence adapter.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use openpools_core::{Error, MatchRecord, MatchStore, RankedMatch, Result};

/// One record per ranked candidate, stamped with `now`.
///
/// Only keyword texts are stored as evidence.
pub fn to_records(user_id: Uuid, ranked: &[RankedMatch], now: DateTime<Utc>) -> Vec<MatchRecord> {
    ranked
        .iter()
        .map(|m| MatchRecord {
            user_id,
            matched_user_id: m.user_id(),
            compatibility_score: m.compatibility,
            common_keywords: m.common_keywords.iter().map(|k| k.keyword.clone()).collect(),
            last_calculated: now,
        })
        .collect()
}

/// Upsert the ranked list for `user_id`, returning the number of rows written.
///
/// Store failures are mapped to [`Error::Persistence`]; callers decide
/// whether that is fatal.
pub async fn persist_matches(
    store: &dyn MatchStore,
    user_id: Uuid,
    ranked: &[RankedMatch],
    now: DateTime<Utc>,
) -> Result<usize> {
    if ranked.is_empty() {
        return Ok(0);
    }

    let records = to_records(user_id, ranked, now);
    match store.upsert_matches(&records).await {
        Ok(()) => {
            debug!(
                subsystem = "matching",
                component = "persistence",
                user_id = %user_id,
                result_count = records.len(),
                "Persisted matches"
            );
            Ok(records.len())
        }
        Err(e) => {
            warn!(
                subsystem = "matching",
                component = "persistence",
                user_id = %user_id,
                error = %e,
                "Failed to persist matches"
            );
            Err(match e {
                Error::Persistence(msg) => Error::Persistence(msg),
                other => Error::Persistence(other.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpools_core::{Category, CategoryWeights, ProfileAttrs, ScoreBreakdown, Source};

    #[test]
    fn test_to_records_maps_evidence_texts() {
        let table = CategoryWeights::default();
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = Utc::now();
        let ranked = vec![RankedMatch {
            profile: ProfileAttrs::new(other),
            compatibility: 42.5,
            common_keywords: vec![
                table.keyword("python", Category::Skills, Source::Resume),
                table.keyword("figma", Category::Tools, Source::Resume),
            ],
            breakdown: ScoreBreakdown::default(),
        }];

        let records = to_records(me, &ranked, now);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, me);
        assert_eq!(records[0].matched_user_id, other);
        assert_eq!(records[0].compatibility_score, 42.5);
        assert_eq!(records[0].common_keywords, vec!["python", "figma"]);
        assert_eq!(records[0].last_calculated, now);
    }

    #[test]
    fn test_to_records_empty() {
        assert!(to_records(Uuid::new_v4(), &[], Utc::now()).is_empty());
    }
}
