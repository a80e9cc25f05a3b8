//! # openpools-matching
//!
//! Keyword weighting and compatibility matching for OpenPools.
//!
//! This crate provides:
//! - Keyword normalization and decoding of stored keyword JSON
//! - The keyword merge engine and weight recalculation
//! - Multi-factor compatibility scoring and ranking
//! - Best-effort match persistence
//! - The ingestion pipeline, match engine, and bulk recalculation services
//!
//! Storage and extraction are injected through the traits in
//! `openpools-core`; nothing here opens a connection.

pub mod bulk;
pub mod engine;
pub mod ingest;
pub mod merge;
pub mod normalize;
pub mod persist;
pub mod recalc;
pub mod scoring;

// Re-export main types
pub use bulk::recalculate_all;
pub use engine::{MatchEngine, MatchRun};
pub use ingest::{IngestOutcome, KeywordIngestor};
pub use merge::{merge, merge_with_stats, MergeStats};
pub use normalize::{normalize, normalize_batch, normalize_text, NormalizeOptions, NormalizedBatch};
pub use persist::{persist_matches, to_records};
pub use recalc::recalculate;
pub use scoring::find_top_matches;
