//! Versioned category weight table and source multipliers.
//!
//! A keyword's weight is a pure function of its category and source:
//! `round(category_weight * source_multiplier, 2)`. The table is passed
//! explicitly to everything that computes weights.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::{Category, Keyword, Source};

/// Confidence multiplier for a keyword source.
pub fn source_multiplier(source: &Source) -> f64 {
    match source {
        Source::Resume | Source::Pdf => defaults::RESUME_MULTIPLIER,
        Source::Linkedin => defaults::LINKEDIN_MULTIPLIER,
        Source::Github => defaults::GITHUB_MULTIPLIER,
        Source::Other(_) => defaults::OTHER_SOURCE_MULTIPLIER,
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Administratively versioned category → base weight table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub version: u32,
    pub weights: BTreeMap<String, f64>,
    /// Weight for categories missing from `weights`.
    #[serde(default = "default_unclassified")]
    pub unclassified: f64,
}

fn default_unclassified() -> f64 {
    defaults::UNCLASSIFIED_CATEGORY_WEIGHT
}

impl Default for CategoryWeights {
    fn default() -> Self {
        let table = [
            (Category::Skills, 1.00),
            (Category::Technologies, 0.95),
            (Category::Expertise, 0.90),
            (Category::Tools, 0.85),
            (Category::Methodologies, 0.80),
            (Category::Domains, 0.80),
            (Category::Projects, 0.70),
            (Category::Roles, 0.65),
            (Category::Certifications, 0.60),
            (Category::Companies, 0.50),
            (Category::Institutions, 0.45),
            (Category::Links, 0.20),
        ];
        Self {
            version: defaults::CATEGORY_WEIGHTS_VERSION,
            weights: table
                .into_iter()
                .map(|(category, weight)| (category.to_string(), weight))
                .collect(),
            unclassified: defaults::UNCLASSIFIED_CATEGORY_WEIGHT,
        }
    }
}

impl CategoryWeights {
    /// Build a table from explicit entries, e.g. for alternate taxonomies.
    pub fn from_entries<I, S>(version: u32, entries: I, unclassified: f64) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let table = Self {
            version,
            weights: entries
                .into_iter()
                .map(|(name, weight)| (Category::parse(name.as_ref()).to_string(), weight))
                .collect(),
            unclassified,
        };
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read category weights {}: {}",
                path.display(),
                e
            ))
        })?;
        let table: Self = serde_json::from_str(&raw)?;
        table.validate()?;
        debug!(
            version = table.version,
            categories = table.weights.len(),
            path = %path.display(),
            "Loaded category weight table"
        );
        Ok(table)
    }

    /// Every weight must lie in [0, 1].
    pub fn validate(&self) -> Result<()> {
        let in_range = |w: f64| (0.0..=1.0).contains(&w);
        if !in_range(self.unclassified) {
            return Err(Error::Config(format!(
                "Unclassified category weight {} is outside [0, 1]",
                self.unclassified
            )));
        }
        for (name, weight) in &self.weights {
            if !in_range(*weight) {
                return Err(Error::Config(format!(
                    "Category weight for '{}' is {} (outside [0, 1])",
                    name, weight
                )));
            }
        }
        Ok(())
    }

    /// Base weight of a category, or the unclassified fallback.
    pub fn category_weight(&self, category: &Category) -> f64 {
        self.weights
            .get(category.as_str())
            .copied()
            .unwrap_or(self.unclassified)
    }

    /// `round(category_weight * source_multiplier, 2)`.
    pub fn weight_for(&self, category: &Category, source: &Source) -> f64 {
        round2(self.category_weight(category) * source_multiplier(source))
    }

    /// Build a keyword with its derived weight. `text` is used as-is.
    pub fn keyword(&self, text: impl Into<String>, category: Category, source: Source) -> Keyword {
        let weight = self.weight_for(&category, &source);
        Keyword {
            keyword: text.into(),
            category,
            source,
            weight,
        }
    }
}
