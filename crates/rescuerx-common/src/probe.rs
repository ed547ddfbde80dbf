//! Key probing and defensive coercion over untyped JSON.
//!
//! Upstream documents drift between pipelines (`drug_name` vs `name` vs
//! `drug`, `best_ror` vs `ror`, ...). Each field is described by an ordered
//! list of candidate keys; the helpers here try them in priority order and
//! coerce whatever they find. Nothing in this module fails: absent or
//! mistyped input yields `None`, `0`, `""` or an empty list.

use serde_json::{Map, Value};

use crate::text::{is_truthy, safe_string};

/// Field lookup that treats `null` the same as an absent key.
pub fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// First candidate key holding a truthy value (`a || b || c`).
pub fn first_truthy<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| value.get(*k))
        .find(|v| is_truthy(v))
}

/// First candidate key present in `obj`, regardless of its value.
pub fn probe_key<'k>(obj: &Map<String, Value>, candidates: &[&'k str]) -> Option<&'k str> {
    candidates.iter().copied().find(|k| obj.contains_key(*k))
}

/// Like [`probe_key`], falling back to the object's first key.
pub fn probe_key_or_first(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    probe_key(obj, candidates)
        .map(str::to_string)
        .or_else(|| obj.keys().next().cloned())
}

/// Coerce a JSON value into a finite number.
///
/// Numbers pass through, numeric strings are parsed, booleans become 1/0.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() { Some(0.0) } else { t.parse::<f64>().ok() }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

/// Numeric field with a default for absent or unparseable values.
pub fn number_or(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(as_number).unwrap_or(default)
}

/// Numeric field where zero counts as "not set" (`x || null`).
pub fn nonzero_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(as_number).filter(|f| *f != 0.0)
}

/// Parse the leading numeric prefix of a string: `"85%"` → 85.
pub fn leading_number(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let end = t
        .char_indices()
        .take_while(|(i, c)| {
            c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))
        })
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    t[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Display text of an optional field; absent → `""`.
pub fn text_of(value: Option<&Value>) -> String {
    value.map(safe_string).unwrap_or_default()
}

/// Items of a list-valued field. A truthy scalar counts as a one-item list.
pub fn items(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(list)) => list.iter().collect(),
        Some(v) if is_truthy(v) => vec![v],
        _ => Vec::new(),
    }
}

/// Display text of every item of a list-valued field.
pub fn text_list(value: Option<&Value>) -> Vec<String> {
    items(value).into_iter().map(safe_string).collect()
}

/// `(key, value)` pairs of an object-valued field, in document order.
pub fn entries(value: Option<&Value>) -> impl Iterator<Item = (&String, &Value)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|obj| obj.iter())
}
