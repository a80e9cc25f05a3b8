//! Admin bulk recalculation.
//!
//! Re-derives every stored keyword weight under the current category table.
//! One bad profile never aborts the batch: its failure is counted, a bounded
//! sample of messages is kept, and the loop moves on.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use openpools_core::{
    KeywordProfileStore, MatchingConfig, RecalculationReport, Result, StoredKeywordProfile,
};

use crate::normalize::{decode_profile, NormalizeOptions};
use crate::recalc::recalculate;

/// Recalculate every stored keyword profile.
///
/// Fails only when the profile list itself cannot be read.
pub async fn recalculate_all(
    store: &dyn KeywordProfileStore,
    config: &MatchingConfig,
) -> Result<RecalculationReport> {
    let start = Instant::now();
    let profiles = store.list_all().await?;

    let mut report = RecalculationReport {
        total_profiles: profiles.len(),
        ..Default::default()
    };

    for stored in &profiles {
        match recalculate_one(store, stored, config).await {
            Ok(()) => report.updated_count += 1,
            Err(e) => {
                warn!(
                    subsystem = "matching",
                    component = "bulk_recalc",
                    user_id = %stored.user_id,
                    error = %e,
                    "Keyword profile recalculation failed"
                );
                report.error_count += 1;
                if report.errors.len() < config.error_sample_cap {
                    report.errors.push(format!("{}: {}", stored.user_id, e));
                }
            }
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        subsystem = "matching",
        component = "bulk_recalc",
        total_profiles = report.total_profiles,
        updated_count = report.updated_count,
        error_count = report.error_count,
        duration_ms = report.duration_ms,
        weights_version = config.category_weights.version,
        "Bulk keyword recalculation complete"
    );

    Ok(report)
}

async fn recalculate_one(
    store: &dyn KeywordProfileStore,
    stored: &StoredKeywordProfile,
    config: &MatchingConfig,
) -> Result<()> {
    let options = NormalizeOptions::default().with_min_len(config.min_keyword_len);
    let (mut profile, _) = decode_profile(stored, &config.category_weights, &options)?;
    let keywords = recalculate(&profile.keywords, &config.category_weights, &options);
    profile.replace_keywords(keywords, Utc::now());
    store.upsert(&profile).await
}
