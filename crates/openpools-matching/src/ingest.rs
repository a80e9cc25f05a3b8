//! Profile ingestion pipeline.
//!
//! A resume parse, LinkedIn import, or journal save ends here: the raw
//! keywords are normalized, merged into the stored profile, and the result
//! is written back.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use openpools_core::{
    Error, KeywordExtractor, KeywordInput, KeywordProfile, KeywordProfileStore, MatchingConfig,
    Result, Source,
};

use crate::merge::{merge_with_stats, MergeStats};
use crate::normalize::{decode_profile, normalize_batch, NormalizeOptions};

/// Result of one ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub profile: KeywordProfile,
    pub stats: MergeStats,
}

/// Merges extracted keywords into stored keyword profiles.
pub struct KeywordIngestor {
    store: Arc<dyn KeywordProfileStore>,
    extractor: Option<Arc<dyn KeywordExtractor>>,
    config: MatchingConfig,
}

impl KeywordIngestor {
    /// Ingestor without an extractor; only [`Self::ingest_keywords`] works.
    pub fn new(store: Arc<dyn KeywordProfileStore>, config: MatchingConfig) -> Self {
        Self {
            store,
            extractor: None,
            config,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn KeywordExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    fn options(&self) -> NormalizeOptions {
        NormalizeOptions::default().with_min_len(self.config.min_keyword_len)
    }

    /// Extract keywords from `text` and merge them into the user's profile.
    #[instrument(skip(self, text), fields(subsystem = "matching", component = "ingest", op = "ingest_text", text_len = text.len()))]
    pub async fn ingest_text(
        &self,
        user_id: Uuid,
        text: &str,
        source: &Source,
    ) -> Result<IngestOutcome> {
        let extractor = self.extractor.as_ref().ok_or_else(|| {
            Error::Config("No keyword extractor configured for text ingestion".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Cannot extract keywords from empty text".to_string(),
            ));
        }

        let start = Instant::now();
        let extracted = extractor.extract(text, source).await?;
        debug!(
            user_id = %user_id,
            source = %source,
            model = extractor.model_name(),
            keyword_count = extracted.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Keyword extraction complete"
        );

        self.ingest_keywords(user_id, extracted, source).await
    }

    /// Merge already-extracted keywords into the user's profile.
    ///
    /// Entries without a source tag are attributed to `source`.
    pub async fn ingest_keywords(
        &self,
        user_id: Uuid,
        inputs: Vec<KeywordInput>,
        source: &Source,
    ) -> Result<IngestOutcome> {
        let start = Instant::now();
        let options = self.options();
        let weights = &self.config.category_weights;

        let tagged: Vec<KeywordInput> = inputs
            .into_iter()
            .map(|input| input.with_default_source(source))
            .collect();
        let batch = normalize_batch(&tagged, weights, &options);

        let now = Utc::now();
        let (mut profile, _) = match self.store.fetch(user_id).await? {
            Some(stored) => decode_profile(&stored, weights, &options)?,
            None => (KeywordProfile::empty(user_id, now), 0),
        };

        let (merged, mut stats) =
            merge_with_stats(&profile.keywords, &batch.keywords, weights, &options);
        stats.skipped += batch.skipped;
        profile.replace_keywords(merged, now);

        self.store.upsert(&profile).await?;

        info!(
            subsystem = "matching",
            component = "ingest",
            user_id = %user_id,
            source = %source,
            keyword_count = profile.total_keywords,
            added = stats.added,
            upgraded = stats.upgraded,
            skipped_count = stats.skipped,
            duration_ms = start.elapsed().as_millis() as u64,
            "Keyword profile updated"
        );

        Ok(IngestOutcome { profile, stats })
    }
}
