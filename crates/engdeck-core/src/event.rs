//! Event log records.
//!
//! Events are strictly append-only: they are written once per interaction and
//! never updated or deleted. Nothing in the core reads them back except the
//! audit endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::Error;

/// What kind of interaction produced an [`Event`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
  /// A speech-to-text transcription; payload is `{"text": ...}`.
  Stt,
  /// A grammar check; payload is the (possibly fallback) feedback.
  Grammar,
}

impl EventKind {
  /// Parse the discriminant stored in the `kind` column.
  pub fn from_column(s: &str) -> Result<Self, Error> {
    s.parse().map_err(|_| Error::UnknownEventKind(s.to_owned()))
  }
}

/// An immutable record of one raw interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
  /// Monotonic, store-assigned.
  pub id:         i64,
  pub user_id:    String,
  pub kind:       EventKind,
  pub payload:    serde_json::Value,
  pub created_at: DateTime<Utc>,
}
