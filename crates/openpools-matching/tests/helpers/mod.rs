//! In-memory store and extractor fakes for matching integration tests.
//!
//! Each fake keeps its rows behind a `Mutex` and can be told to fail so
//! error paths can be exercised without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use openpools_core::{
    CategoryWeights, Category, Error, Keyword, KeywordExtractor, KeywordInput, KeywordProfile,
    KeywordProfileStore, MatchRecord, MatchStore, ProfileAttrs, ProfileStore, Result, Source,
    StoredKeywordProfile,
};

// =============================================================================
// PROFILES
// =============================================================================

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<Vec<ProfileAttrs>>,
}

impl MemoryProfileStore {
    pub fn new(profiles: Vec<ProfileAttrs>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
        }
    }

    pub fn insert(&self, profile: ProfileAttrs) {
        self.profiles.lock().unwrap().push(profile);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileAttrs>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_candidates(&self, exclude_user_id: Uuid) -> Result<Vec<ProfileAttrs>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id != exclude_user_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// KEYWORD PROFILES
// =============================================================================

#[derive(Default)]
pub struct MemoryKeywordStore {
    rows: Mutex<HashMap<Uuid, StoredKeywordProfile>>,
    /// Insertion order, so `list_all` is deterministic.
    order: Mutex<Vec<Uuid>>,
    fail_upsert_for: Mutex<Vec<Uuid>>,
    fail_reads: AtomicBool,
    pub fetch_many_calls: AtomicUsize,
}

impl MemoryKeywordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw keyword JSON for a user, bypassing normalization.
    pub fn put_raw(&self, user_id: Uuid, keywords: JsonValue) {
        let total = keywords.as_array().map(|a| a.len()).unwrap_or(0) as i32;
        let row = StoredKeywordProfile {
            user_id,
            keywords,
            total_keywords: total,
            last_updated: Utc::now(),
        };
        if self.rows.lock().unwrap().insert(user_id, row).is_none() {
            self.order.lock().unwrap().push(user_id);
        }
    }

    pub fn put_keywords(&self, user_id: Uuid, keywords: &[Keyword]) {
        self.put_raw(user_id, serde_json::to_value(keywords).unwrap());
    }

    pub fn get(&self, user_id: Uuid) -> Option<StoredKeywordProfile> {
        self.rows.lock().unwrap().get(&user_id).cloned()
    }

    /// Decoded keywords as stored, without renormalizing.
    pub fn keywords(&self, user_id: Uuid) -> Vec<Keyword> {
        self.get(user_id)
            .map(|row| serde_json::from_value(row.keywords).unwrap())
            .unwrap_or_default()
    }

    pub fn fail_upsert_for(&self, user_id: Uuid) {
        self.fail_upsert_for.lock().unwrap().push(user_id);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl KeywordProfileStore for MemoryKeywordStore {
    async fn fetch(&self, user_id: Uuid) -> Result<Option<StoredKeywordProfile>> {
        self.check_reads()?;
        Ok(self.get(user_id))
    }

    async fn fetch_many(&self, user_ids: &[Uuid]) -> Result<Vec<StoredKeywordProfile>> {
        self.check_reads()?;
        self.fetch_many_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(user_ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn list_all(&self) -> Result<Vec<StoredKeywordProfile>> {
        self.check_reads()?;
        let rows = self.rows.lock().unwrap();
        Ok(self
            .order
            .lock()
            .unwrap()
            .iter()
            .filter_map(|id| rows.get(id).cloned())
            .collect())
    }

    async fn upsert(&self, profile: &KeywordProfile) -> Result<()> {
        if self.fail_upsert_for.lock().unwrap().contains(&profile.user_id) {
            return Err(store_unavailable());
        }
        let row = StoredKeywordProfile {
            user_id: profile.user_id,
            keywords: serde_json::to_value(&profile.keywords)?,
            total_keywords: profile.total_keywords,
            last_updated: profile.last_updated,
        };
        if self.rows.lock().unwrap().insert(profile.user_id, row).is_none() {
            self.order.lock().unwrap().push(profile.user_id);
        }
        Ok(())
    }
}

// =============================================================================
// MATCHES
// =============================================================================

#[derive(Default)]
pub struct MemoryMatchStore {
    rows: Mutex<HashMap<(Uuid, Uuid), MatchRecord>>,
    fail_writes: AtomicBool,
    pub upsert_calls: AtomicUsize,
}

impl MemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn get(&self, user_id: Uuid, matched_user_id: Uuid) -> Option<MatchRecord> {
        self.rows
            .lock()
            .unwrap()
            .get(&(user_id, matched_user_id))
            .cloned()
    }
}

#[async_trait]
impl MatchStore for MemoryMatchStore {
    async fn upsert_matches(&self, records: &[MatchRecord]) -> Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(store_unavailable());
        }
        let mut rows = self.rows.lock().unwrap();
        for record in records {
            rows.insert((record.user_id, record.matched_user_id), record.clone());
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MatchRecord>> {
        let mut records: Vec<MatchRecord> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(records)
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Returns a canned keyword list for every call.
pub struct MockExtractor {
    keywords: Vec<KeywordInput>,
    pub calls: AtomicUsize,
}

impl MockExtractor {
    pub fn new(keywords: Vec<KeywordInput>) -> Self {
        Self {
            keywords,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl KeywordExtractor for MockExtractor {
    async fn extract(&self, _text: &str, _source: &Source) -> Result<Vec<KeywordInput>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.keywords.clone())
    }

    fn model_name(&self) -> &str {
        "mock-extractor"
    }
}

/// Always fails, as an unreachable LLM would.
pub struct FailingExtractor;

#[async_trait]
impl KeywordExtractor for FailingExtractor {
    async fn extract(&self, _text: &str, _source: &Source) -> Result<Vec<KeywordInput>> {
        Err(Error::Extraction("model unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-extractor"
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

pub fn store_unavailable() -> Error {
    Error::Internal("store unavailable".to_string())
}

pub fn kw(text: &str, category: Category, source: Source) -> Keyword {
    CategoryWeights::default().keyword(text, category, source)
}

pub fn profile(user_id: Uuid) -> ProfileAttrs {
    ProfileAttrs {
        full_name: Some(format!("User {}", &user_id.to_string()[..8])),
        ..ProfileAttrs::new(user_id)
    }
}
