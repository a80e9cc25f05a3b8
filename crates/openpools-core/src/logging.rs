//! Structured logging field name constants for OpenPools.
//!
//! The canonical field vocabulary for every crate. `tracing` macros need
//! literal keys, so call sites spell these names out; anything querying logs
//! (dashboards, alerts, `jq` filters) should use the constants.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (keywords, candidates) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "matching", "database", "inference", "admin"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "normalizer", "merge", "scorer", "bulk_recalc", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "merge", "find_top_matches", "persist", "extract"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// User UUID owning the profile being operated on.
pub const USER_ID: &str = "user_id";

/// Keyword source tag of an ingestion batch.
pub const SOURCE: &str = "source";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned.
pub const RESULT_COUNT: &str = "result_count";

/// Number of candidates scored.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of keywords after an operation.
pub const KEYWORD_COUNT: &str = "keyword_count";

/// Number of malformed entries dropped.
pub const SKIPPED_COUNT: &str = "skipped_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

/// Database table affected.
pub const DB_TABLE: &str = "db_table";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for extraction.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Every field name above, for vocabulary checks.
pub const ALL_FIELDS: &[&str] = &[
    SUBSYSTEM,
    COMPONENT,
    OPERATION,
    USER_ID,
    SOURCE,
    DURATION_MS,
    RESULT_COUNT,
    CANDIDATE_COUNT,
    KEYWORD_COUNT,
    SKIPPED_COUNT,
    POOL_SIZE,
    POOL_IDLE,
    DB_TABLE,
    MODEL,
    SUCCESS,
    ERROR_MSG,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique() {
        let unique: HashSet<&str> = ALL_FIELDS.iter().copied().collect();
        assert_eq!(unique.len(), ALL_FIELDS.len());
    }

    #[test]
    fn test_field_names_are_snake_case() {
        for name in ALL_FIELDS {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "{name} is not snake_case"
            );
        }
    }
}
