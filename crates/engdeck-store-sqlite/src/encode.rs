//! Conversions between domain types and the plain-text column
//! representations.
//!
//! Timestamps are stored as RFC 3339 strings and event payloads as compact
//! JSON.

use chrono::{DateTime, Utc};
use engdeck_core::{
  event::{Event, EventKind},
  user::User,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `users` row as read from SQLite, before decoding.
pub struct RawUser {
  pub user_id:    String,
  pub created_at: String,
}

impl RawUser {
  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    self.user_id,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// An `events` row as read from SQLite, before decoding.
pub struct RawEvent {
  pub id:         i64,
  pub user_id:    String,
  pub kind:       String,
  pub payload:    String,
  pub created_at: String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      id:         self.id,
      user_id:    self.user_id,
      kind:       EventKind::from_column(&self.kind)?,
      payload:    serde_json::from_str(&self.payload)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dt_roundtrip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn bad_dt_is_reported() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }

  #[test]
  fn unknown_event_kind_is_reported() {
    let raw = RawEvent {
      id:         1,
      user_id:    "u".into(),
      kind:       "vocab".into(),
      payload:    "{}".into(),
      created_at: encode_dt(Utc::now()),
    };
    assert!(matches!(raw.into_event(), Err(Error::Core(_))));
  }
}
