//! Centralized default constants for OpenPools.
//!
//! All crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// KEYWORDS
// =============================================================================

/// Minimum keyword length (in characters) after trimming.
pub const MIN_KEYWORD_LEN: usize = 2;

/// Maximum keyword length (in characters); longer entries are dropped.
pub const MAX_KEYWORD_LEN: usize = 100;

/// Category assumed when an extracted keyword carries none.
pub const DEFAULT_CATEGORY: &str = "skills";

/// Source assumed when an extracted keyword carries none.
pub const DEFAULT_SOURCE: &str = "pdf";

/// Weight of a category missing from the weight table.
///
/// Kept as its own constant even though it equals the `companies` weight.
pub const UNCLASSIFIED_CATEGORY_WEIGHT: f64 = 0.50;

/// Version tag of the built-in category weight table.
pub const CATEGORY_WEIGHTS_VERSION: u32 = 1;

// =============================================================================
// SOURCE MULTIPLIERS
// =============================================================================

/// Multiplier for keywords extracted from a resume or PDF upload.
pub const RESUME_MULTIPLIER: f64 = 1.0;

/// Multiplier for keywords imported from LinkedIn.
pub const LINKEDIN_MULTIPLIER: f64 = 0.95;

/// Multiplier for keywords imported from GitHub.
pub const GITHUB_MULTIPLIER: f64 = 0.9;

/// Multiplier for any other source (journal entries, invites, unset).
pub const OTHER_SOURCE_MULTIPLIER: f64 = 0.8;

// =============================================================================
// SCORING
// =============================================================================

/// Upper bound of the compatibility scale.
pub const MAX_COMPATIBILITY: f64 = 100.0;

/// Points available to keyword overlap.
pub const KEYWORD_OVERLAP_POINTS: f64 = 85.0;

/// Smallest divisor for the keyword overlap share. One full-weight keyword
/// saturates the share; a lone low-weight keyword cannot.
pub const MIN_OVERLAP_MASS: f64 = 1.0;

/// Points for a shared location.
pub const LOCATION_POINTS: f64 = 6.0;

/// Points for an identical job title.
pub const JOB_TITLE_POINTS: f64 = 5.0;

/// Points for job titles sharing at least one word.
pub const JOB_TITLE_PARTIAL_POINTS: f64 = 2.5;

/// Points for a shared company.
pub const COMPANY_POINTS: f64 = 4.0;

/// Default number of matches returned per request.
pub const MATCH_LIMIT: usize = 50;

// =============================================================================
// BULK RECALCULATION
// =============================================================================

/// Maximum number of per-profile error messages kept in a bulk report.
pub const ERROR_SAMPLE_CAP: usize = 10;

// =============================================================================
// EXTRACTION
// =============================================================================

/// Default OpenAI-compatible endpoint for keyword extraction.
pub const LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default extraction model.
pub const LLM_MODEL: &str = "gpt-4o-mini";

/// Timeout for extraction requests in seconds.
pub const LLM_TIMEOUT_SECS: u64 = 60;

/// Maximum characters of source text sent to the extractor.
pub const LLM_MAX_INPUT_CHARS: usize = 24_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_multipliers_descending() {
        assert!(RESUME_MULTIPLIER > LINKEDIN_MULTIPLIER);
        assert!(LINKEDIN_MULTIPLIER > GITHUB_MULTIPLIER);
        assert!(GITHUB_MULTIPLIER > OTHER_SOURCE_MULTIPLIER);
    }

    #[test]
    fn test_attribute_points_below_keyword_points() {
        let attribute_max = LOCATION_POINTS + JOB_TITLE_POINTS + COMPANY_POINTS;
        assert!(attribute_max < KEYWORD_OVERLAP_POINTS);
        assert!((attribute_max + KEYWORD_OVERLAP_POINTS - MAX_COMPATIBILITY).abs() < 1e-9);
    }

    #[test]
    fn test_keyword_length_bounds() {
        assert!(MIN_KEYWORD_LEN < MAX_KEYWORD_LEN);
    }
}
