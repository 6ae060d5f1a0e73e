use serde_json::Value;

/// Whether a value has renderable content.
///
/// Absent: null, an empty list, a string that is blank after trimming.
/// Everything else is present, including `0`, `false`, `{}` and `[""]`.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => true,
    }
}
