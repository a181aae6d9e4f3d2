//! Extraction of a JSON object from raw model output.
//!
//! The model is told to answer with "ONLY JSON" but routinely wraps the
//! object in commentary. We take everything from the first `{` to the last
//! `}` and decode that span strictly. This is a heuristic, not a JSON-in-text
//! parser: a `}` inside a string value after the real closing brace, or a
//! second object in the commentary, makes the span undecodable and we fall
//! back.

use serde_json::{Map, Value};

/// The decoded payload: always a JSON object.
pub type Payload = Map<String, Value>;

/// Locate the candidate span: first `{` through last `}`, inclusive.
///
/// Returns `None` when either brace is missing or the closing brace does not
/// follow the opening one.
pub fn json_span(raw: &str) -> Option<&str> {
  let start = raw.find('{')?;
  let end = raw.rfind('}')?;
  (end > start).then(|| &raw[start..=end])
}

/// Decode the JSON object embedded in `raw`, or `None` if there isn't one.
pub fn try_extract(raw: &str) -> Option<Payload> {
  let span = json_span(raw)?;
  serde_json::from_str(span).ok()
}

/// Decode the JSON object embedded in `raw`, returning `fallback` on any
/// failure. Never fails.
pub fn extract_or(raw: &str, fallback: Payload) -> Payload {
  match try_extract(raw) {
    Some(payload) => payload,
    None => {
      tracing::warn!(
        raw_len = raw.len(),
        has_span = json_span(raw).is_some(),
        "model output did not contain a decodable JSON object; using fallback"
      );
      fallback
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn obj(v: Value) -> Payload {
    match v {
      Value::Object(m) => m,
      other => panic!("not an object: {other}"),
    }
  }

  #[test]
  fn bare_object_is_decoded() {
    let payload = extract_or(r#"{"a": 1}"#, Payload::new());
    assert_eq!(payload, obj(json!({ "a": 1 })));
  }

  #[test]
  fn surrounding_prose_is_ignored() {
    let raw = "Sure! Here you go:\n{\"exercises\": [{\"type\": \"choose\"}]}\nGood luck!";
    let payload = extract_or(raw, Payload::new());
    assert_eq!(payload, obj(json!({ "exercises": [{ "type": "choose" }] })));
  }

  #[test]
  fn nested_objects_survive() {
    let raw = r#"out: {"x": {"y": {"z": [1, 2]}}} end"#;
    assert_eq!(try_extract(raw), Some(obj(json!({ "x": { "y": { "z": [1, 2] } } }))));
  }

  #[test]
  fn no_braces_yields_fallback() {
    let fallback = obj(json!({ "exercises": [] }));
    assert_eq!(extract_or("I cannot help with that.", fallback.clone()), fallback);
  }

  #[test]
  fn reversed_braces_yield_fallback() {
    assert_eq!(json_span("} oops {"), None);
    let fallback = obj(json!({ "exercises": [] }));
    assert_eq!(extract_or("} oops {", fallback.clone()), fallback);
  }

  #[test]
  fn only_opening_brace_yields_fallback() {
    assert_eq!(json_span("{\"corrected\": \"trunc"), None);
  }

  #[test]
  fn malformed_object_yields_fallback() {
    let fallback = obj(json!({ "corrected": "orig", "issues": [] }));
    let raw = r#"{"corrected": "x", "issues": [}"#;
    assert_eq!(extract_or(raw, fallback.clone()), fallback);
  }

  #[test]
  fn two_objects_in_output_yield_fallback() {
    // The span runs from the first object's `{` to the second object's `}`.
    let raw = r#"{"a": 1} and also {"b": 2}"#;
    assert_eq!(json_span(raw), Some(raw));
    assert_eq!(try_extract(raw), None);
  }

  #[test]
  fn closing_brace_in_trailing_prose_breaks_extraction() {
    // Known limitation: a `}` after the real object extends the span past it.
    let raw = r#"{"corrected": "ok", "issues": []} (note: use } carefully)"#;
    assert_eq!(try_extract(raw), None);
  }

  #[test]
  fn closing_brace_inside_string_is_fine_when_object_ends_last() {
    // The last `}` is still the real one, so the span is the whole object.
    let raw = r#"{"message": "use } here"}"#;
    assert_eq!(try_extract(raw), Some(obj(json!({ "message": "use } here" }))));
  }

  #[test]
  fn truncated_output_with_brace_in_string_is_cut_short() {
    // Known limitation: the last `}` sits inside a string value, so the span
    // is truncated there and decoding fails.
    let raw = r#"{"corrected": "a}b", "issues": [{"span": "x"#;
    assert_eq!(json_span(raw), Some(r#"{"corrected": "a}"#));
    assert_eq!(try_extract(raw), None);
  }

  #[test]
  fn opening_brace_in_leading_prose_breaks_extraction() {
    // Known limitation: a `{` before the real object starts the span early.
    let raw = r#"Format {like this}: {"corrected": "ok", "issues": []}"#;
    assert_eq!(try_extract(raw), None);
  }

  #[test]
  fn non_object_json_is_not_accepted() {
    assert_eq!(try_extract("[1, 2, 3]"), None);
  }
}
