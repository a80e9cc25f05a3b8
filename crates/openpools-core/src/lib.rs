//! # openpools-core
//!
//! Core types, traits, and abstractions for the OpenPools matchmaking engine.
//!
//! This crate provides the foundational data structures (keywords, keyword
//! profiles, match records), the versioned category-weight table, and the
//! store/extractor traits that the other OpenPools crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod weights;

// Re-export commonly used types at crate root
pub use config::MatchingConfig;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use weights::{source_multiplier, CategoryWeights};
