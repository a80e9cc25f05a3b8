//! Compatibility scoring.
//!
//! Scores are on a 0-100 scale and are the sum of two parts:
//!
//! - **Keyword overlap** (up to `keyword_overlap` points, 85 by default):
//!   the requester's keyword weight mass that the candidate also holds.
//!   Each shared keyword contributes `min(self_weight, candidate_weight)`,
//!   and the sum is divided by the requester's total keyword weight, or by
//!   [`MIN_OVERLAP_MASS`] when the total is smaller, so sharing a lone
//!   `links` keyword is worth less than sharing a lone `skills` keyword.
//! - **Attribute affinity** (up to 15 points by default): same location,
//!   same or overlapping job title, same company.
//!
//! Attribute points can never exceed keyword points (enforced by
//! [`ScoringWeights::validate`]), so keyword overlap always dominates.
//!
//! The scorer is pure; persisting results is the caller's job.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use openpools_core::config::ScoringWeights;
use openpools_core::defaults::MIN_OVERLAP_MASS;
use openpools_core::weights::round2;
use openpools_core::{Keyword, MatchCandidate, ProfileAttrs, RankedMatch, ScoreBreakdown};

use crate::normalize::normalize_text;

/// Requester keywords deduplicated by normalized text.
struct SelfIndex<'a> {
    /// First occurrence of each text, in profile order.
    ordered: Vec<(String, &'a Keyword)>,
    /// Highest weight seen per text.
    weights: HashMap<String, f64>,
    total_weight: f64,
}

impl<'a> SelfIndex<'a> {
    fn build(keywords: &'a [Keyword]) -> Self {
        let mut ordered = Vec::with_capacity(keywords.len());
        let mut weights: HashMap<String, f64> = HashMap::with_capacity(keywords.len());
        for keyword in keywords {
            let text = normalize_text(&keyword.keyword);
            if text.is_empty() {
                continue;
            }
            match weights.get_mut(&text) {
                Some(w) => *w = w.max(keyword.weight),
                None => {
                    weights.insert(text.clone(), keyword.weight);
                    ordered.push((text, keyword));
                }
            }
        }
        let total_weight = weights.values().sum();
        Self {
            ordered,
            weights,
            total_weight,
        }
    }
}

/// Rank `candidates` against the requester and keep the top `limit`.
///
/// Candidates carrying the requester's own ID are skipped. Ordering is
/// descending by compatibility; equal scores keep their input order.
pub fn find_top_matches(
    self_keywords: &[Keyword],
    candidates: &[MatchCandidate],
    limit: usize,
    self_profile: &ProfileAttrs,
    scoring: &ScoringWeights,
) -> Vec<RankedMatch> {
    let index = SelfIndex::build(self_keywords);

    let mut ranked: Vec<RankedMatch> = candidates
        .iter()
        .filter(|c| c.profile.user_id != self_profile.user_id)
        .map(|candidate| score_candidate(&index, candidate, self_profile, scoring))
        .collect();

    ranked.sort_by(|a, b| {
        b.compatibility
            .partial_cmp(&a.compatibility)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);

    debug!(
        subsystem = "matching",
        component = "scorer",
        user_id = %self_profile.user_id,
        candidate_count = candidates.len(),
        result_count = ranked.len(),
        keyword_count = index.ordered.len(),
        "Ranked candidates"
    );

    ranked
}

fn score_candidate(
    index: &SelfIndex<'_>,
    candidate: &MatchCandidate,
    self_profile: &ProfileAttrs,
    scoring: &ScoringWeights,
) -> RankedMatch {
    let mut candidate_weights: HashMap<String, f64> = HashMap::new();
    for keyword in &candidate.keywords {
        let text = normalize_text(&keyword.keyword);
        let entry = candidate_weights.entry(text).or_insert(keyword.weight);
        *entry = entry.max(keyword.weight);
    }

    let mut shared_weight = 0.0;
    let mut common_keywords = Vec::new();
    for (text, keyword) in &index.ordered {
        if let Some(candidate_weight) = candidate_weights.get(text) {
            let self_weight = index.weights.get(text).copied().unwrap_or(keyword.weight);
            shared_weight += self_weight.min(*candidate_weight);
            common_keywords.push((*keyword).clone());
        }
    }

    let keyword_score = if index.total_weight > 0.0 {
        let mass = index.total_weight.max(MIN_OVERLAP_MASS);
        scoring.keyword_overlap * (shared_weight / mass).min(1.0)
    } else {
        0.0
    };
    let attribute_score = attribute_affinity(self_profile, &candidate.profile, scoring);

    RankedMatch {
        profile: candidate.profile.clone(),
        compatibility: round2(keyword_score + attribute_score),
        common_keywords,
        breakdown: ScoreBreakdown {
            keyword_score: round2(keyword_score),
            attribute_score: round2(attribute_score),
        },
    }
}

/// Points from shared structured attributes.
pub fn attribute_affinity(
    self_profile: &ProfileAttrs,
    candidate: &ProfileAttrs,
    scoring: &ScoringWeights,
) -> f64 {
    let mut points = 0.0;

    if same_value(&self_profile.location, &candidate.location) {
        points += scoring.location;
    }

    if same_value(&self_profile.job_title, &candidate.job_title) {
        points += scoring.job_title;
    } else if titles_overlap(&self_profile.job_title, &candidate.job_title) {
        points += scoring.job_title_partial;
    }

    if same_value(&self_profile.company, &candidate.company) {
        points += scoring.company;
    }

    points
}

fn normalized_attr(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(normalize_text)
        .filter(|v| !v.is_empty())
}

fn same_value(a: &Option<String>, b: &Option<String>) -> bool {
    match (normalized_attr(a), normalized_attr(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn titles_overlap(a: &Option<String>, b: &Option<String>) -> bool {
    let (Some(a), Some(b)) = (normalized_attr(a), normalized_attr(b)) else {
        return false;
    };
    let words: HashSet<&str> = title_words(&a).collect();
    let shared = title_words(&b).any(|w| words.contains(w));
    shared
}

fn title_words(title: &str) -> impl Iterator<Item = &str> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
}
