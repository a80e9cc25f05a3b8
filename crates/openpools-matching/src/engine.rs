//! Request-driven match computation.
//!
//! One call runs the whole unit of work sequentially: load the requester,
//! load every candidate and their keyword profiles, score, persist, return.
//! Persistence is best effort; a failed write never discards a computed
//! ranking.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use openpools_core::{
    Error, KeywordProfileStore, MatchCandidate, MatchRecord, MatchStore, MatchingConfig,
    ProfileStore, RankedMatch, Result, StoredKeywordProfile,
};

use crate::normalize::{decode_profile_lenient, NormalizeOptions};
use crate::persist::persist_matches;
use crate::scoring::find_top_matches;

/// Outcome of one match computation.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRun {
    pub matches: Vec<RankedMatch>,
    /// Whether the ranking was written to the match store.
    pub persisted: bool,
    /// Why persisting failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_error: Option<String>,
}

/// Computes and stores ranked matches for a user.
pub struct MatchEngine {
    profiles: Arc<dyn ProfileStore>,
    keyword_profiles: Arc<dyn KeywordProfileStore>,
    matches: Arc<dyn MatchStore>,
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        keyword_profiles: Arc<dyn KeywordProfileStore>,
        matches: Arc<dyn MatchStore>,
        config: MatchingConfig,
    ) -> Self {
        Self {
            profiles,
            keyword_profiles,
            matches,
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank every other user against `user_id`.
    ///
    /// `limit` defaults to the configured match limit. Store reads that fail
    /// are returned as errors; a failed write is reported in the run.
    #[instrument(skip(self), fields(subsystem = "matching", component = "engine", op = "compute_matches"))]
    pub async fn compute_matches(&self, user_id: Uuid, limit: Option<usize>) -> Result<MatchRun> {
        let start = Instant::now();
        let limit = limit.unwrap_or(self.config.match_limit);
        let options = NormalizeOptions::default().with_min_len(self.config.min_keyword_len);
        let weights = &self.config.category_weights;

        let self_profile = self
            .profiles
            .fetch_profile(user_id)
            .await?
            .ok_or(Error::ProfileNotFound(user_id))?;

        let self_stored = self.keyword_profiles.fetch(user_id).await?;
        let self_keywords =
            decode_profile_lenient(user_id, self_stored.as_ref(), weights, &options);

        let candidate_profiles = self.profiles.list_candidates(user_id).await?;
        let candidate_ids: Vec<Uuid> = candidate_profiles.iter().map(|p| p.user_id).collect();
        let mut stored_by_user: HashMap<Uuid, StoredKeywordProfile> = if candidate_ids.is_empty() {
            HashMap::new()
        } else {
            self.keyword_profiles
                .fetch_many(&candidate_ids)
                .await?
                .into_iter()
                .map(|stored| (stored.user_id, stored))
                .collect()
        };

        let candidates: Vec<MatchCandidate> = candidate_profiles
            .into_iter()
            .filter(|p| p.user_id != user_id)
            .map(|profile| {
                let stored = stored_by_user.remove(&profile.user_id);
                let keywords =
                    decode_profile_lenient(profile.user_id, stored.as_ref(), weights, &options);
                MatchCandidate { profile, keywords }
            })
            .collect();

        let ranked = find_top_matches(
            &self_keywords,
            &candidates,
            limit,
            &self_profile,
            &self.config.scoring,
        );

        let (persisted, persist_error) =
            match persist_matches(self.matches.as_ref(), user_id, &ranked, Utc::now()).await {
                Ok(_) => (true, None),
                Err(e) => (false, Some(e.to_string())),
            };

        info!(
            user_id = %user_id,
            candidate_count = candidates.len(),
            result_count = ranked.len(),
            persisted,
            duration_ms = start.elapsed().as_millis() as u64,
            "Match computation complete"
        );

        Ok(MatchRun {
            matches: ranked,
            persisted,
            persist_error,
        })
    }

    /// Read back the last persisted ranking for `user_id`.
    pub async fn stored_matches(&self, user_id: Uuid) -> Result<Vec<MatchRecord>> {
        let records = self.matches.list_for_user(user_id).await.map_err(|e| {
            warn!(
                subsystem = "matching",
                component = "engine",
                user_id = %user_id,
                error = %e,
                "Failed to read stored matches"
            );
            e
        })?;
        Ok(records)
    }
}
