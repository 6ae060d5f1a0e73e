//! Response Normalizer: turns raw AI text into a `CanonicalRecord`.
//!
//! Algorithm:
//! 1. Remove every literal "```json" and then every "```", wherever they appear.
//! 2. Parse what is left as strict JSON; it must be an object.
//! 3. Read known keys into typed slots, keep everything else verbatim.
//!
//! Pure: no I/O, no persistence.

use serde_json::Value;
use thiserror::Error;

use crate::models::record::CanonicalRecord;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Malformed AI response: {details}")]
    MalformedAiResponse { details: String },
}

impl NormalizeError {
    fn malformed(details: impl Into<String>) -> Self {
        NormalizeError::MalformedAiResponse {
            details: details.into(),
        }
    }
}

/// Removes every occurrence of the fence markers, not just the outer pair.
pub fn strip_fence_markers(text: &str) -> String {
    text.replace(JSON_FENCE, "").replace(FENCE, "")
}

pub fn normalize(raw_text: &str) -> Result<CanonicalRecord, NormalizeError> {
    let cleaned = strip_fence_markers(raw_text);

    let parsed: Value =
        serde_json::from_str(&cleaned).map_err(|e| NormalizeError::malformed(e.to_string()))?;

    if !parsed.is_object() {
        return Err(NormalizeError::malformed(format!(
            "expected a JSON object, got {}",
            json_type_name(&parsed)
        )));
    }

    serde_json::from_value(parsed).map_err(|e| NormalizeError::malformed(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
