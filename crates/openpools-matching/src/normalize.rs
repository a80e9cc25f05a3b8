//! Keyword normalization.
//!
//! Every keyword entering the core passes through here, whatever shape it
//! arrived in. Entries that cannot be normalized are dropped and counted,
//! never raised as errors.

use serde_json::Value as JsonValue;
use tracing::{trace, warn};
use uuid::Uuid;

use openpools_core::{
    defaults, CategoryWeights, Category, Error, Keyword, KeywordInput, KeywordProfile, Result,
    Source, StoredKeywordProfile,
};

/// Length bounds applied to normalized keyword text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            min_len: defaults::MIN_KEYWORD_LEN,
            max_len: defaults::MAX_KEYWORD_LEN,
        }
    }
}

impl NormalizeOptions {
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }
}

/// Keywords that survived normalization plus the number dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedBatch {
    pub keywords: Vec<Keyword>,
    pub skipped: usize,
}

/// Canonical comparison key: trimmed, lowercased, inner whitespace collapsed.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn text_within_bounds(text: &str, options: &NormalizeOptions) -> bool {
    let len = text.chars().count();
    len >= options.min_len && len <= options.max_len
}

fn parse_or_default<T>(value: Option<&str>, parse: fn(&str) -> T) -> T
where
    T: Default,
{
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => parse(v),
        _ => T::default(),
    }
}

/// Normalize one raw keyword.
///
/// Returns `None` when the text is empty or outside the length bounds.
/// Any caller-supplied weight is discarded.
pub fn normalize(
    input: &KeywordInput,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> Option<Keyword> {
    let text = normalize_text(input.text());
    if !text_within_bounds(&text, options) {
        trace!(raw = input.text(), "Dropping unnormalizable keyword");
        return None;
    }

    let (category, source) = match input {
        KeywordInput::Text(_) => (Category::default(), Source::default()),
        KeywordInput::Weighted(raw) => (
            parse_or_default(raw.category.as_deref(), Category::parse),
            parse_or_default(raw.source.as_deref(), Source::parse),
        ),
    };

    Some(weights.keyword(text, category, source))
}

/// Re-normalize an already-typed keyword, recomputing its weight.
pub fn normalize_keyword(
    keyword: &Keyword,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> Option<Keyword> {
    let text = normalize_text(&keyword.keyword);
    if !text_within_bounds(&text, options) {
        return None;
    }
    Some(weights.keyword(text, keyword.category.clone(), keyword.source.clone()))
}

/// Normalize a batch, keeping input order. Duplicates are left for the merge.
pub fn normalize_batch<'a, I>(
    inputs: I,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> NormalizedBatch
where
    I: IntoIterator<Item = &'a KeywordInput>,
{
    let mut batch = NormalizedBatch::default();
    for input in inputs {
        match normalize(input, weights, options) {
            Some(keyword) => batch.keywords.push(keyword),
            None => batch.skipped += 1,
        }
    }
    batch
}

/// Decode a stored keyword column.
///
/// The column must be a JSON array; individual entries that fail to parse
/// or normalize are skipped and counted.
pub fn decode_keywords(
    value: &JsonValue,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> std::result::Result<NormalizedBatch, String> {
    let entries = match value {
        JsonValue::Array(entries) => entries,
        JsonValue::Null => return Ok(NormalizedBatch::default()),
        other => {
            return Err(format!(
                "keywords must be a JSON array, found {}",
                json_kind(other)
            ))
        }
    };

    let mut batch = NormalizedBatch::default();
    for entry in entries {
        let normalized = serde_json::from_value::<KeywordInput>(entry.clone())
            .ok()
            .and_then(|input| normalize(&input, weights, options));
        match normalized {
            Some(keyword) => batch.keywords.push(keyword),
            None => batch.skipped += 1,
        }
    }
    Ok(batch)
}

/// Decode a stored row into a typed profile.
///
/// Fails with [`Error::MalformedProfile`] when the keyword column is not a
/// list. The cached count is refreshed to match the decoded keywords.
pub fn decode_profile(
    stored: &StoredKeywordProfile,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> Result<(KeywordProfile, usize)> {
    let batch = decode_keywords(&stored.keywords, weights, options).map_err(|reason| {
        Error::MalformedProfile {
            user_id: stored.user_id,
            reason,
        }
    })?;
    Ok((
        KeywordProfile::new(stored.user_id, batch.keywords, stored.last_updated),
        batch.skipped,
    ))
}

/// Decode a stored row for scoring, degrading to an empty keyword set.
pub fn decode_profile_lenient(
    user_id: Uuid,
    stored: Option<&StoredKeywordProfile>,
    weights: &CategoryWeights,
    options: &NormalizeOptions,
) -> Vec<Keyword> {
    let Some(stored) = stored else {
        return Vec::new();
    };
    match decode_keywords(&stored.keywords, weights, options) {
        Ok(batch) => {
            if batch.skipped > 0 {
                warn!(
                    subsystem = "matching",
                    component = "normalizer",
                    user_id = %user_id,
                    skipped_count = batch.skipped,
                    "Skipped malformed stored keywords"
                );
            }
            batch.keywords
        }
        Err(reason) => {
            warn!(
                subsystem = "matching",
                component = "normalizer",
                user_id = %user_id,
                error = %reason,
                "Treating malformed keyword profile as empty"
            );
            Vec::new()
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
