//! Gemini response extraction.
//!
//! Walks the `candidates[0].content.parts[0].text` envelope, strips markdown code
//! fences from the model output, and parses what remains as a JSON object.
//! Every failure is folded into a `ResumeResult`; details go to the log.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::resume::ResumeResult;

/// Whole-string match of a fenced block, with an optional `json` language tag.
static FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A```(?:json\s*)?\s*([\s\S]*?)\s*```\z").expect("Invalid code fence regex")
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Empty or null response from Gemini API.")]
    EmptyResponse,

    #[error("Gemini API feedback: {0}")]
    PromptFeedback(String),

    #[error("Unexpected response structure, no candidates.")]
    NoCandidates,

    #[error("Missing 'content' in Gemini response.")]
    MissingContent,

    #[error("Missing 'parts' in Gemini response content.")]
    MissingParts,

    #[error("Missing 'text' in Gemini response part.")]
    MissingText,

    #[error("Failed to parse Gemini response: {0}. Check if the LLM output is valid JSON.")]
    Parse(String),
}

/// Converts a raw `generateContent` response body into the result shape.
pub fn parse_gemini_response(raw: &str) -> ResumeResult {
    match extract_resume_data(raw) {
        Ok(data) => {
            info!("Parsed Gemini response content ({} top-level fields)", data.len());
            ResumeResult::success(data)
        }
        Err(e) => {
            warn!("Could not extract resume data from Gemini response: {e}");
            ResumeResult::failure(e.to_string())
        }
    }
}

fn extract_resume_data(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::EmptyResponse);
    }

    let root: Value = serde_json::from_str(raw).map_err(|e| ExtractError::Parse(e.to_string()))?;
    debug!("Raw Gemini API response: {raw}");

    let text = extract_text(&root)?;
    debug!("Extracted text before fence stripping:\n{text}");

    let payload = strip_code_fences(text);
    debug!("JSON payload after fence stripping:\n{payload}");

    parse_payload(payload)
}

/// Navigates `candidates[0].content.parts[0].text`.
fn extract_text(root: &Value) -> Result<&str, ExtractError> {
    let Some(candidate) = root
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
    else {
        return Err(no_candidates(root));
    };

    // An explicit `"content": null` counts as present; it then fails on `parts`.
    let content = candidate.get("content").ok_or(ExtractError::MissingContent)?;

    let part = content
        .get("parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .ok_or(ExtractError::MissingParts)?;

    part.get("text")
        .and_then(Value::as_str)
        .ok_or(ExtractError::MissingText)
}

/// Builds the error for an envelope without candidates, logging any safety feedback.
fn no_candidates(root: &Value) -> ExtractError {
    let Some(feedback) = root.get("promptFeedback").filter(|f| !f.is_null()) else {
        warn!("Unexpected Gemini response structure: no 'candidates' found");
        return ExtractError::NoCandidates;
    };

    warn!("Gemini returned no candidates; prompt feedback: {feedback}");
    if let Some(ratings) = feedback.get("safetyRatings").and_then(Value::as_array) {
        for rating in ratings {
            let category = rating.get("category").and_then(|v| v.as_str()).unwrap_or("unknown");
            let probability = rating.get("probability").and_then(|v| v.as_str()).unwrap_or("unknown");
            warn!(category, probability, "Gemini safety rating");
        }
    }
    ExtractError::PromptFeedback(feedback.to_string())
}

/// Strips a surrounding ```` ``` ```` / ```` ```json ```` fence if it wraps the whole text.
/// Text that is not fully fenced comes back trimmed and otherwise untouched.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    match FENCE_REGEX.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim(),
        None => trimmed,
    }
}

fn parse_payload(payload: &str) -> Result<Map<String, Value>, ExtractError> {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ExtractError::Parse(format!(
            "expected a JSON object but found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ExtractError::Parse(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
