//! # openpools-inference
//!
//! LLM keyword extraction for OpenPools.
//!
//! The extractor turns resume, LinkedIn, or journal text into raw keywords.
//! Weights the model returns are ignored downstream; the matching core
//! recomputes every weight from category and source.

pub mod openai;
pub mod parse;
pub mod prompt;

pub use openai::{OpenAIConfig, OpenAIKeywordExtractor};
pub use parse::parse_keyword_response;
