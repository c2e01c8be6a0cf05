// Per-field checks used by the edit forms. Each check records its message
// under `field` and returns the cleaned value only when the input passes.

use super::FieldErrors;

/// Trimmed, non-empty text
pub fn require_text(errors: &mut FieldErrors, field: &str, label: &str, input: &str) -> Option<String> {
    let value = input.trim();
    if value.is_empty() {
        errors.insert(field.to_string(), format!("{} is required", label));
        return None;
    }
    Some(value.to_string())
}

/// Whole number no smaller than `min`
pub fn require_min(errors: &mut FieldErrors, field: &str, label: &str, input: &str, min: i64) -> Option<i64> {
    let value = input.trim();
    if value.is_empty() {
        errors.insert(field.to_string(), format!("{} is required", label));
        return None;
    }
    match value.parse::<i64>() {
        Ok(n) if n >= min => Some(n),
        Ok(_) => {
            errors.insert(field.to_string(), format!("{} must be at least {}", label, min));
            None
        }
        Err(_) => {
            errors.insert(field.to_string(), format!("{} must be a number", label));
            None
        }
    }
}

/// Absolute http(s) URL
pub fn require_url(errors: &mut FieldErrors, field: &str, label: &str, input: &str) -> Option<String> {
    let value = require_text(errors, field, label, input)?;
    match url::Url::parse(&value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some() => Some(value),
        _ => {
            errors.insert(field.to_string(), format!("{} must be an http(s) URL", label));
            None
        }
    }
}
