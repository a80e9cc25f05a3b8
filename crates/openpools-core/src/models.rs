//! Core data models for OpenPools.
//!
//! These types are shared across all OpenPools crates and represent the
//! keyword profiles, candidate views, and match records the matching core
//! operates on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

// =============================================================================
// KEYWORD TAXONOMY
// =============================================================================

/// Taxonomy bucket driving a keyword's base importance.
///
/// Unknown category names survive as [`Category::Other`] so they round-trip
/// through storage; they are weighted with the unclassified fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Skills,
    Technologies,
    Expertise,
    Tools,
    Methodologies,
    Domains,
    Projects,
    Roles,
    Certifications,
    Companies,
    Institutions,
    Links,
    Other(String),
}

impl Category {
    /// All named categories, in descending importance order.
    pub const KNOWN: [Category; 12] = [
        Category::Skills,
        Category::Technologies,
        Category::Expertise,
        Category::Tools,
        Category::Methodologies,
        Category::Domains,
        Category::Projects,
        Category::Roles,
        Category::Certifications,
        Category::Companies,
        Category::Institutions,
        Category::Links,
    ];

    /// Parse a category name, trimming and lowercasing it first.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "skills" => Self::Skills,
            "technologies" => Self::Technologies,
            "expertise" => Self::Expertise,
            "tools" => Self::Tools,
            "methodologies" => Self::Methodologies,
            "domains" => Self::Domains,
            "projects" => Self::Projects,
            "roles" => Self::Roles,
            "certifications" => Self::Certifications,
            "companies" => Self::Companies,
            "institutions" => Self::Institutions,
            "links" => Self::Links,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Skills => "skills",
            Self::Technologies => "technologies",
            Self::Expertise => "expertise",
            Self::Tools => "tools",
            Self::Methodologies => "methodologies",
            Self::Domains => "domains",
            Self::Projects => "projects",
            Self::Roles => "roles",
            Self::Certifications => "certifications",
            Self::Companies => "companies",
            Self::Institutions => "institutions",
            Self::Links => "links",
            Self::Other(name) => name,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::parse(crate::defaults::DEFAULT_CATEGORY)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

/// Provenance of a keyword, driving its confidence multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    Resume,
    Pdf,
    Linkedin,
    Github,
    /// Journal entries, invite claims, or anything else.
    Other(String),
}

impl Source {
    /// Parse a source tag, trimming and lowercasing it first.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "resume" => Self::Resume,
            "pdf" => Self::Pdf,
            "linkedin" => Self::Linkedin,
            "github" => Self::Github,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Resume => "resume",
            Self::Pdf => "pdf",
            Self::Linkedin => "linkedin",
            Self::Github => "github",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::parse(crate::defaults::DEFAULT_SOURCE)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Source> for String {
    fn from(s: Source) -> Self {
        s.as_str().to_string()
    }
}

// =============================================================================
// KEYWORD TYPES
// =============================================================================

/// Canonical keyword as stored in a keyword profile.
///
/// `weight` is always derived from `(category, source)`; construct keywords
/// through the normalizer or [`crate::CategoryWeights::keyword`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    pub category: Category,
    pub source: Source,
    pub weight: f64,
}

/// Keyword entry as produced by the extractor or found in stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawKeyword {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Advisory only; always recomputed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Either shape a keyword arrives in at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordInput {
    Text(String),
    Weighted(RawKeyword),
}

impl KeywordInput {
    /// The unnormalized keyword text.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Weighted(raw) => &raw.keyword,
        }
    }

    /// Fill in `source` when the entry carries none.
    pub fn with_default_source(self, source: &Source) -> Self {
        match self {
            Self::Text(keyword) => Self::Weighted(RawKeyword {
                keyword,
                source: Some(source.to_string()),
                ..Default::default()
            }),
            Self::Weighted(mut raw) => {
                if raw.source.as_deref().map_or(true, |s| s.trim().is_empty()) {
                    raw.source = Some(source.to_string());
                }
                Self::Weighted(raw)
            }
        }
    }
}

impl From<&str> for KeywordInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<RawKeyword> for KeywordInput {
    fn from(raw: RawKeyword) -> Self {
        Self::Weighted(raw)
    }
}

impl From<&Keyword> for KeywordInput {
    fn from(k: &Keyword) -> Self {
        Self::Weighted(RawKeyword {
            keyword: k.keyword.clone(),
            category: Some(k.category.to_string()),
            source: Some(k.source.to_string()),
            weight: Some(k.weight),
        })
    }
}

// =============================================================================
// KEYWORD PROFILE TYPES
// =============================================================================

/// A user's full weighted keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordProfile {
    pub user_id: Uuid,
    pub keywords: Vec<Keyword>,
    /// Cached `keywords.len()`.
    pub total_keywords: i32,
    pub last_updated: DateTime<Utc>,
}

impl KeywordProfile {
    pub fn new(user_id: Uuid, keywords: Vec<Keyword>, now: DateTime<Utc>) -> Self {
        let total_keywords = keywords.len() as i32;
        Self {
            user_id,
            keywords,
            total_keywords,
            last_updated: now,
        }
    }

    /// An empty profile for a user with no ingested sources yet.
    pub fn empty(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self::new(user_id, Vec::new(), now)
    }

    /// Swap the keyword list, refreshing the cached count and timestamp.
    pub fn replace_keywords(&mut self, keywords: Vec<Keyword>, now: DateTime<Utc>) {
        self.total_keywords = keywords.len() as i32;
        self.keywords = keywords;
        self.last_updated = now;
    }
}

/// Keyword profile row as read from the store, before decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredKeywordProfile {
    pub user_id: Uuid,
    pub keywords: JsonValue,
    pub total_keywords: i32,
    pub last_updated: DateTime<Utc>,
}

// =============================================================================
// PROFILE & MATCH TYPES
// =============================================================================

/// Structured profile attributes used for scoring and display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileAttrs {
    pub user_id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
}

impl ProfileAttrs {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }
}

/// A candidate's keywords joined with its profile, alive for one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub profile: ProfileAttrs,
    pub keywords: Vec<Keyword>,
}

/// How a compatibility score was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Points from weighted keyword overlap.
    pub keyword_score: f64,
    /// Points from shared location, job title, and company.
    pub attribute_score: f64,
}

/// One scored candidate, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    #[serde(flatten)]
    pub profile: ProfileAttrs,
    /// Compatibility on a 0-100 scale.
    pub compatibility: f64,
    /// Keywords both users hold, as they appear in the requester's profile.
    pub common_keywords: Vec<Keyword>,
    pub breakdown: ScoreBreakdown,
}

impl RankedMatch {
    pub fn user_id(&self) -> Uuid {
        self.profile.user_id
    }
}

/// Persisted result of the last scoring pass for an ordered user pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub user_id: Uuid,
    pub matched_user_id: Uuid,
    pub compatibility_score: f64,
    pub common_keywords: Vec<String>,
    pub last_calculated: DateTime<Utc>,
}

/// Outcome of an admin bulk recalculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecalculationReport {
    pub total_profiles: usize,
    pub updated_count: usize,
    pub error_count: usize,
    /// First few per-profile failures; bounded by the configured cap.
    pub errors: Vec<String>,
    pub duration_ms: u64,
}
