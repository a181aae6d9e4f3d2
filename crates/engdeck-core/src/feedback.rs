//! Structured payloads decoded from model output.
//!
//! Neither [`GrammarFeedback`] nor [`ExerciseSet`] is persisted on its own;
//! grammar feedback is written to the event log and exercise sets are
//! returned straight to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::extract::{self, Payload};

// ─── Lenient field decoding ──────────────────────────────────────────────────

/// Accept any JSON scalar where a string is expected; `null` becomes empty.
fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Value::deserialize(de)? {
    Value::Null => String::new(),
    Value::String(s) => s,
    other => other.to_string(),
  })
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

// ─── Grammar feedback ────────────────────────────────────────────────────────

/// One detected grammar or vocabulary problem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  #[serde(default, deserialize_with = "lenient_string")]
  pub span:       String,
  /// Free text as the model wrote it, e.g. `"Tenses"`.
  #[serde(default, deserialize_with = "lenient_string")]
  pub category:   String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub message:    String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub suggestion: String,
}

/// Corrected text plus the issues found in the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarFeedback {
  pub corrected: String,
  pub issues:    Vec<Issue>,
}

#[derive(Deserialize)]
struct RawGrammarFeedback {
  #[serde(default)]
  corrected: Option<String>,
  #[serde(default, deserialize_with = "null_as_default")]
  issues:    Vec<Issue>,
}

impl GrammarFeedback {
  /// The feedback used when the model output cannot be decoded: the input is
  /// echoed back unchanged with no issues.
  pub fn fallback(original: &str) -> Self {
    Self { corrected: original.to_owned(), issues: Vec::new() }
  }

  /// Decode grammar feedback from raw model output. Never fails.
  ///
  /// A missing `corrected` key falls back to `original`. A payload whose
  /// `issues` is not an array of objects is treated like undecodable output.
  pub fn from_model_output(raw: &str, original: &str) -> Self {
    let payload = extract::extract_or(raw, Self::fallback(original).to_payload());
    match serde_json::from_value::<RawGrammarFeedback>(Value::Object(payload)) {
      Ok(parsed) => Self {
        corrected: parsed.corrected.unwrap_or_else(|| original.to_owned()),
        issues:    parsed.issues,
      },
      Err(e) => {
        tracing::warn!(error = %e, "grammar payload has the wrong shape; using fallback");
        Self::fallback(original)
      }
    }
  }

  /// The categories of all issues, in order.
  pub fn categories(&self) -> impl Iterator<Item = &str> {
    self.issues.iter().map(|i| i.category.as_str())
  }

  /// The JSON object logged to the event table and returned to callers.
  pub fn to_payload(&self) -> Payload {
    match serde_json::to_value(self) {
      Ok(Value::Object(map)) => map,
      _ => Payload::new(),
    }
  }
}

// ─── Exercises ───────────────────────────────────────────────────────────────

/// The exercise types the model is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ExerciseKind {
  FillBlank,
  Choose,
  Transform,
}

/// One practice task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
  /// Kept verbatim; see [`Exercise::kind`].
  #[serde(rename = "type", default, deserialize_with = "lenient_string")]
  pub kind_raw: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub prompt:   String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub answer:   String,
}

impl Exercise {
  /// The exercise type, if the model used one of the allowed values.
  pub fn kind(&self) -> Option<ExerciseKind> { self.kind_raw.parse().ok() }
}

/// An ordered list of exercises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
  #[serde(default, deserialize_with = "null_as_default")]
  pub exercises: Vec<Exercise>,
}

impl ExerciseSet {
  /// Decode an exercise set from raw model output. Never fails; undecodable
  /// output yields an empty set.
  pub fn from_model_output(raw: &str) -> Self {
    let payload = extract::extract_or(raw, Self::default().to_payload());
    match serde_json::from_value::<ExerciseSet>(Value::Object(payload)) {
      Ok(set) => {
        let unknown = set.exercises.iter().filter(|e| e.kind().is_none()).count();
        if unknown > 0 {
          tracing::debug!(unknown, "model produced exercises with unlisted types");
        }
        set
      }
      Err(e) => {
        tracing::warn!(error = %e, "exercise payload has the wrong shape; using fallback");
        Self::default()
      }
    }
  }

  /// The JSON object returned to callers: `{"exercises": [...]}`.
  pub fn to_payload(&self) -> Payload {
    match serde_json::to_value(self) {
      Ok(Value::Object(map)) => map,
      _ => Payload::new(),
    }
  }
}
