// Extraction prompt template.
// The target shape is embedded verbatim so the prompt is byte-identical for identical input.

/// Compact JSON description of the record the model is asked to return.
pub const TARGET_SHAPE: &str = r#"{"name":"string","email":"string","education":{"degree":"string","branch":"string","institution":"string","year":"number"},"experience":{"job_title":"string","company":"string","start_date":"string","end_date":"string"},"skills":["string"],"summary":"string"}"#;

pub const EXTRACTION_PROMPT_TEMPLATE: &str = "\
Extract the following details from the given resume text and return in strict JSON format.
Return only valid JSON without any additional text:
{target_shape}
Resume Text: {raw_text}";

pub fn build_extraction_prompt(raw_text: &str) -> String {
    // Substitute the shape first so resume text containing "{target_shape}" is left alone.
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{target_shape}", TARGET_SHAPE)
        .replacen("{raw_text}", raw_text, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_shape_is_valid_json() {
        let shape: serde_json::Value = serde_json::from_str(TARGET_SHAPE).unwrap();
        assert_eq!(shape["experience"]["start_date"], "string");
        assert_eq!(shape["education"]["year"], "number");
    }

    #[test]
    fn test_prompt_embeds_shape_and_text() {
        let prompt = build_extraction_prompt("Jane Doe, Rust engineer");
        assert!(prompt.contains(TARGET_SHAPE));
        assert!(prompt.ends_with("Resume Text: Jane Doe, Rust engineer"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_extraction_prompt("x"), build_extraction_prompt("x"));
    }

    #[test]
    fn test_placeholder_in_resume_text_is_not_expanded() {
        let prompt = build_extraction_prompt("literally {target_shape}");
        assert!(prompt.ends_with("Resume Text: literally {target_shape}"));
    }
}
