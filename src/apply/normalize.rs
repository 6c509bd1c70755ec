use serde_json::Value;

use crate::schema::schema_model::Setting;

// ============================================================================
// Value normalization — compare heterogeneous representations uniformly
// ============================================================================

/// Canonical boolean for a desired value. `"true"`, `"1"`, `"yes"`, `"on"`
/// (case-insensitive) all mean true; their counterparts mean false. Anything
/// else falls back to truthiness.
pub fn normalize_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => {
            let lowered = s.trim().to_lowercase();
            match lowered.as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => !lowered.is_empty(),
            }
        }
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::Null => false,
        _ => true,
    }
}

/// Canonical trimmed string for a desired value. Null becomes empty.
pub fn normalize_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Trimmed form of an optional schema string.
pub fn normalize_opt(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_string()
}

/// Resolve the option label to act on for a choice-based setting: match the
/// desired value against option values first, then option labels, else use
/// the raw desired text as the label.
pub fn resolve_option_label(setting: &Setting, desired: &Value) -> String {
    let desired_text = normalize_str(desired);
    for option in &setting.options {
        if normalize_opt(option.value.as_deref()) == desired_text {
            let label = normalize_opt(option.label.as_deref());
            return if label.is_empty() { desired_text } else { label };
        }
        if normalize_opt(option.label.as_deref()) == desired_text {
            return normalize_opt(option.label.as_deref());
        }
    }
    desired_text
}
