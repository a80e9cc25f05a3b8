//! Matching configuration.
//!
//! Loaded from environment variables with fallbacks from [`crate::defaults`]:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `OPENPOOLS_MATCH_LIMIT` | 50 |
//! | `OPENPOOLS_MIN_KEYWORD_LEN` | 2 |
//! | `OPENPOOLS_ERROR_SAMPLE_CAP` | 10 |
//! | `OPENPOOLS_CATEGORY_WEIGHTS_FILE` | built-in v1 table |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::defaults;
use crate::error::{Error, Result};
use crate::weights::CategoryWeights;

/// Points each compatibility factor can contribute (0-100 scale).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub keyword_overlap: f64,
    pub location: f64,
    pub job_title: f64,
    pub job_title_partial: f64,
    pub company: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            keyword_overlap: defaults::KEYWORD_OVERLAP_POINTS,
            location: defaults::LOCATION_POINTS,
            job_title: defaults::JOB_TITLE_POINTS,
            job_title_partial: defaults::JOB_TITLE_PARTIAL_POINTS,
            company: defaults::COMPANY_POINTS,
        }
    }
}

impl ScoringWeights {
    /// Maximum points structured attributes can add.
    pub fn attribute_max(&self) -> f64 {
        self.location + self.job_title.max(self.job_title_partial) + self.company
    }

    /// Keyword overlap must stay the dominant factor.
    pub fn validate(&self) -> Result<()> {
        let all = [
            self.keyword_overlap,
            self.location,
            self.job_title,
            self.job_title_partial,
            self.company,
        ];
        if all.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(Error::Config(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if self.attribute_max() >= self.keyword_overlap {
            return Err(Error::Config(format!(
                "Attribute points ({}) must stay below keyword overlap points ({})",
                self.attribute_max(),
                self.keyword_overlap
            )));
        }
        if self.keyword_overlap + self.attribute_max() > defaults::MAX_COMPATIBILITY {
            return Err(Error::Config(format!(
                "Scoring weights exceed the {} point scale",
                defaults::MAX_COMPATIBILITY
            )));
        }
        Ok(())
    }
}

/// Configuration shared by the ingestion, scoring, and recalculation paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub match_limit: usize,
    pub min_keyword_len: usize,
    pub error_sample_cap: usize,
    pub category_weights: CategoryWeights,
    pub scoring: ScoringWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            match_limit: defaults::MATCH_LIMIT,
            min_keyword_len: defaults::MIN_KEYWORD_LEN,
            error_sample_cap: defaults::ERROR_SAMPLE_CAP,
            category_weights: CategoryWeights::default(),
            scoring: ScoringWeights::default(),
        }
    }
}

impl MatchingConfig {
    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        let category_weights = match std::env::var("OPENPOOLS_CATEGORY_WEIGHTS_FILE") {
            Ok(path) if !path.trim().is_empty() => {
                CategoryWeights::from_json_file(&PathBuf::from(path))?
            }
            _ => CategoryWeights::default(),
        };

        let config = Self {
            match_limit: env_parse("OPENPOOLS_MATCH_LIMIT", defaults::MATCH_LIMIT)?,
            min_keyword_len: env_parse("OPENPOOLS_MIN_KEYWORD_LEN", defaults::MIN_KEYWORD_LEN)?,
            error_sample_cap: env_parse(
                "OPENPOOLS_ERROR_SAMPLE_CAP",
                defaults::ERROR_SAMPLE_CAP,
            )?,
            category_weights,
            scoring: ScoringWeights::default(),
        };
        config.validate()?;

        info!(
            match_limit = config.match_limit,
            min_keyword_len = config.min_keyword_len,
            weights_version = config.category_weights.version,
            "Matching configuration loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_keyword_len == 0 {
            return Err(Error::Config(
                "Minimum keyword length must be at least 1".to_string(),
            ));
        }
        if self.min_keyword_len > defaults::MAX_KEYWORD_LEN {
            return Err(Error::Config(format!(
                "Minimum keyword length {} exceeds the maximum {}",
                self.min_keyword_len,
                defaults::MAX_KEYWORD_LEN
            )));
        }
        self.category_weights.validate()?;
        self.scoring.validate()
    }
}

fn env_parse(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a non-negative integer", key))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.match_limit, 50);
        assert_eq!(config.error_sample_cap, 10);
    }

    #[test]
    fn test_scoring_attribute_max() {
        let scoring = ScoringWeights::default();
        assert_eq!(scoring.attribute_max(), 15.0);
    }

    #[test]
    fn test_scoring_rejects_dominant_attributes() {
        let scoring = ScoringWeights {
            keyword_overlap: 10.0,
            location: 20.0,
            ..Default::default()
        };
        assert!(matches!(scoring.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_scoring_rejects_negative() {
        let scoring = ScoringWeights {
            company: -1.0,
            ..Default::default()
        };
        assert!(scoring.validate().is_err());
    }

    #[test]
    fn test_zero_min_keyword_len_rejected() {
        let config = MatchingConfig {
            min_keyword_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scoring_partial_deserialization() {
        let scoring: ScoringWeights = serde_json::from_str(r#"{"location": 3.0}"#).unwrap();
        assert_eq!(scoring.location, 3.0);
        assert_eq!(scoring.keyword_overlap, defaults::KEYWORD_OVERLAP_POINTS);
    }
}
