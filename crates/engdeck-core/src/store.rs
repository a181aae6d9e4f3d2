//! The `LearnerStore` trait.
//!
//! Implemented by storage backends (e.g. `engdeck-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  event::{Event, EventKind},
  stats::{MistakeTally, Stats},
  user::User,
};

/// Abstraction over the persisted users, events and stats.
///
/// Events are append-only. Stats counters are only ever incremented, and
/// every increment is applied in place by the backend so concurrent
/// requests for the same user cannot lose updates.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LearnerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create the user if it does not exist yet. Never overwrites an existing
  /// row. Returns `true` if the user was newly created.
  fn ensure_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  // ── Events — append-only ──────────────────────────────────────────────

  /// Append an event and return it with its store-assigned id and
  /// timestamp.
  fn append_event<'a>(
    &'a self,
    user_id: &'a str,
    kind: EventKind,
    payload: serde_json::Value,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + 'a;

  /// The most recent `limit` events for a user, newest first.
  fn list_events<'a>(
    &'a self,
    user_id: &'a str,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  // ── Stats ─────────────────────────────────────────────────────────────

  /// Create the user's stats row if missing (without touching existing
  /// counters), then add `tally` to it in a single in-place update.
  ///
  /// Returns `true` if the stats row was newly created.
  fn record_mistakes<'a>(
    &'a self,
    user_id: &'a str,
    tally: MistakeTally,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Read a user's counters. Returns `None` if no stats row exists.
  fn get_stats<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Option<Stats>, Self::Error>> + Send + 'a;
}
