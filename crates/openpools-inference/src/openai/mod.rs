//! OpenAI-compatible keyword extraction.
//!
//! Works with any endpoint speaking the chat-completions protocol: the
//! OpenAI cloud API, Azure OpenAI, Ollama in compatibility mode, vLLM,
//! or LM Studio.
//!
//! # Example
//!
//! ```rust,no_run
//! use openpools_core::{KeywordExtractor, Source};
//! use openpools_inference::openai::{OpenAIConfig, OpenAIKeywordExtractor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let extractor = OpenAIKeywordExtractor::new(OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(),
//!         model: "llama3".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let keywords = extractor
//!         .extract("Backend engineer, Rust and PostgreSQL", &Source::Resume)
//!         .await
//!         .unwrap();
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIConfig, OpenAIKeywordExtractor};
pub use error::{to_openpools_error, OpenAIErrorCode};
pub use types::*;
