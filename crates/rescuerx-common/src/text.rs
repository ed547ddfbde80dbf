//! Display-string helpers.
//!
//! Upstream pipelines put free text, nested summary objects, numbers and
//! lists wherever they like. Everything that ends up in a report goes
//! through [`safe_string`] so callers never have to care which one they got.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Object keys consulted, in order, before falling back to joining every
/// string value of an object.
const PREFERRED_KEYS: &[&str] = &["key_finding", "summary", "interpretation", "text", "description"];

/// Keys that only count when they hold a non-empty string.
const STRING_ONLY_KEYS: &[&str] = &["summary", "interpretation"];

/// Convert an arbitrary JSON value into one display string.
///
/// - `null` → `""`
/// - strings pass through, numbers use [`format_number`]
/// - objects: the first truthy preferred key (see [`PREFERRED_KEYS`]), else
///   every string value joined with `". "`, else compact JSON
/// - arrays: every string element joined with `". "`, else compact JSON
pub fn safe_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => format_number(n.as_f64().unwrap_or(0.0)),
        },
        Value::Array(items) => join_strings(items.iter()).unwrap_or_else(|| value.to_string()),
        Value::Object(map) => {
            for key in PREFERRED_KEYS {
                let Some(field) = map.get(*key) else { continue };
                if STRING_ONLY_KEYS.contains(key) {
                    if let Value::String(s) = field {
                        if !s.is_empty() {
                            return s.clone();
                        }
                    }
                } else if is_truthy(field) {
                    return safe_string(field);
                }
            }
            join_strings(map.values()).unwrap_or_else(|| value.to_string())
        }
    }
}

fn join_strings<'a>(values: impl Iterator<Item = &'a Value>) -> Option<String> {
    let parts: Vec<&str> = values.filter_map(Value::as_str).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(". "))
    }
}

/// Loose truthiness for upstream values: `null`, `false`, `0`, `NaN` and `""` are falsy;
/// every object and array is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Format a number the way the upstream reports print it: integral values
/// without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn shouting_word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // ASCII word boundaries: "SGLT2" and "McDONALD" are left alone.
        Regex::new(r"(?-u:\b)([A-Z])([A-Z]+)(?-u:\b)").unwrap()
    })
}

/// Turn an identifier-style drug name into a display name.
///
/// Every all-caps word of two or more letters is capitalised:
/// `"BEVACIZUMAB"` → `"Bevacizumab"`, `"VALPROIC ACID"` → `"Valproic Acid"`.
pub fn display_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    shouting_word_regex()
        .replace_all(name, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_lowercase())
        })
        .into_owned()
}

/// `"response_rate_phase_ii"` → `"Response Rate Phase Ii"`.
///
/// Underscores become spaces and the first character of each ASCII word is
/// upper-cased; the rest is left as is.
pub fn title_label(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut prev_is_word = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_is_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_is_word = is_word;
    }
    out
}
