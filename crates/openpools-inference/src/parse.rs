//! Parsing of model output into raw keywords.
//!
//! Models are asked for `{"keywords": [...]}` but do not always comply.
//! Accepted shapes:
//!
//! - `{"keywords": [...]}`
//! - a bare top-level array
//! - either of the above wrapped in a markdown code fence
//!
//! List entries may be strings or `{keyword, category?, source?, weight?}`
//! objects. Entries of any other shape are dropped.

use serde_json::Value as JsonValue;
use tracing::debug;

use openpools_core::{Error, KeywordInput, Result};

/// Parse model output into keyword inputs.
///
/// Fails with [`Error::Extraction`] when no keyword list can be found.
pub fn parse_keyword_response(content: &str) -> Result<Vec<KeywordInput>> {
    let body = strip_code_fence(content.trim());
    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::Extraction(format!("Model returned invalid JSON: {}", e)))?;

    let entries = match value {
        JsonValue::Array(entries) => entries,
        JsonValue::Object(mut map) => match map.remove("keywords") {
            Some(JsonValue::Array(entries)) => entries,
            Some(JsonValue::Null) | None => {
                return Err(Error::Extraction(
                    "Model response has no keywords list".to_string(),
                ))
            }
            Some(_) => {
                return Err(Error::Extraction(
                    "Model response keywords field is not a list".to_string(),
                ))
            }
        },
        _ => {
            return Err(Error::Extraction(
                "Model response is not a JSON object or list".to_string(),
            ))
        }
    };

    let total = entries.len();
    let keywords: Vec<KeywordInput> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if keywords.len() < total {
        debug!(
            subsystem = "inference",
            component = "parser",
            skipped_count = total - keywords.len(),
            "Dropped unparseable keyword entries"
        );
    }
    Ok(keywords)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop an optional language tag on the opening line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_shape() {
        let keywords = parse_keyword_response(
            r#"{"keywords": [{"keyword": "Rust", "category": "skills"}, "Tokio"]}"#,
        )
        .unwrap();
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].text(), "Rust");
        assert_eq!(keywords[1], KeywordInput::Text("Tokio".to_string()));
    }

    #[test]
    fn test_parse_bare_array() {
        let keywords = parse_keyword_response(r#"["python", "sql"]"#).unwrap();
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn test_parse_code_fenced() {
        let content = "```json\n{\"keywords\": [\"figma\"]}\n```";
        let keywords = parse_keyword_response(content).unwrap();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].text(), "figma");
    }

    #[test]
    fn test_parse_drops_bad_entries() {
        let keywords =
            parse_keyword_response(r#"{"keywords": ["ok", 7, {"category": "skills"}, null]}"#)
                .unwrap();
        assert_eq!(keywords.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_keyword_response("Here are the keywords: rust, go").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn test_parse_rejects_missing_list() {
        assert!(parse_keyword_response(r#"{"skills": ["rust"]}"#).is_err());
        assert!(parse_keyword_response(r#"{"keywords": "rust"}"#).is_err());
        assert!(parse_keyword_response("42").is_err());
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_keyword_response(r#"{"keywords": []}"#)
            .unwrap()
            .is_empty());
    }
}
