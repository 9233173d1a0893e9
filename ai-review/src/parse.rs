//! Extracts and decodes the JSON review object embedded in model prose.
//!
//! The model is instructed to answer with a JSON object, but it routinely
//! wraps it in prose or markdown fences. We locate the first top-level
//! brace-delimited object (string- and escape-aware) and decode that.

use chrono::Utc;
use serde::Deserialize;

use crate::errors::{AiResult, AiReviewError};
use crate::orchestrator::{ReviewMetadata, ReviewResult};

/// Returns the first top-level `{ ... }` object in `text`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Raw decode target; `summary` and `suggestions` are the contract,
/// `highlights`/`risks` are optional extras.
#[derive(Debug, Deserialize)]
struct RawReview {
    summary: String,
    suggestions: Vec<String>,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    risks: Vec<String>,
}

/// Parses the model's raw text into a [`ReviewResult`], stamping metadata.
pub fn parse_review(text: &str, model: &str) -> AiResult<ReviewResult> {
    let json = extract_json_object(text)
        .ok_or_else(|| AiReviewError::Parse("no JSON object found in response".to_string()))?;

    let raw: RawReview = serde_json::from_str(json)
        .map_err(|e| AiReviewError::Parse(format!("invalid review object: {e}")))?;

    Ok(ReviewResult {
        summary: raw.summary,
        suggestions: raw.suggestions,
        highlights: raw.highlights,
        risks: raw.risks,
        metadata: ReviewMetadata {
            model: model.to_string(),
            timestamp: Utc::now(),
        },
    })
}
