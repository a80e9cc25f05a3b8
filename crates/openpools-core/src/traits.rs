//! Core traits for OpenPools collaborators.
//!
//! The matching core never opens its own connections; it is handed
//! implementations of these traits (PostgreSQL in `openpools-db`, an
//! OpenAI-compatible client in `openpools-inference`, in-memory fakes in
//! tests).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// PROFILE STORE
// =============================================================================

/// Read access to structured user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch one profile by user ID.
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileAttrs>>;

    /// Fetch every profile except the given user's.
    async fn list_candidates(&self, exclude_user_id: Uuid) -> Result<Vec<ProfileAttrs>>;
}

// =============================================================================
// KEYWORD PROFILE STORE
// =============================================================================

/// One keyword-profile row per user, keyed by `user_id`.
#[async_trait]
pub trait KeywordProfileStore: Send + Sync {
    /// Fetch a user's stored keyword profile, undecoded.
    async fn fetch(&self, user_id: Uuid) -> Result<Option<StoredKeywordProfile>>;

    /// Fetch stored keyword profiles for many users in one read.
    /// Users without a profile are simply absent from the result.
    async fn fetch_many(&self, user_ids: &[Uuid]) -> Result<Vec<StoredKeywordProfile>>;

    /// List every stored keyword profile (admin bulk operations).
    async fn list_all(&self) -> Result<Vec<StoredKeywordProfile>>;

    /// Insert or overwrite the row for `profile.user_id`.
    async fn upsert(&self, profile: &KeywordProfile) -> Result<()>;
}

// =============================================================================
// MATCH STORE
// =============================================================================

/// Persisted match results keyed by `(user_id, matched_user_id)`.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Upsert every record; conflicting rows are overwritten entirely.
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<()>;

    /// Stored matches for a user, highest score first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MatchRecord>>;
}

// =============================================================================
// KEYWORD EXTRACTOR
// =============================================================================

/// External LLM keyword extractor.
///
/// Returned weights are advisory; the matching core always recomputes them.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    /// Extract keywords from raw text tagged with its source.
    async fn extract(&self, text: &str, source: &Source) -> Result<Vec<KeywordInput>>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
