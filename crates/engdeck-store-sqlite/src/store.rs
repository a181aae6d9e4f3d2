//! [`SqliteStore`] — the SQLite implementation of [`LearnerStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use engdeck_core::{
  event::{Event, EventKind},
  stats::{MistakeTally, Stats},
  store::LearnerStore,
  user::User,
};

use crate::{
  encode::{encode_dt, RawEvent, RawUser},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A learner store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LearnerStore impl ───────────────────────────────────────────────────────

impl LearnerStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn ensure_user(&self, user_id: &str) -> Result<bool> {
    let id     = user_id.to_owned();
    let at_str = encode_dt(Utc::now());

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO users (user_id, created_at) VALUES (?1, ?2)
           ON CONFLICT(user_id) DO NOTHING",
          rusqlite::params![id, at_str],
        )?)
      })
      .await?;

    Ok(inserted == 1)
  }

  async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
    let id = user_id.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, created_at FROM users WHERE user_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawUser {
                user_id:    row.get(0)?,
                created_at: row.get(1)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  // ── Events — append-only ──────────────────────────────────────────────────

  async fn append_event(
    &self,
    user_id: &str,
    kind:    EventKind,
    payload: serde_json::Value,
  ) -> Result<Event> {
    let created_at  = Utc::now();
    let id_str      = user_id.to_owned();
    let kind_str    = kind.to_string();
    let payload_str = serde_json::to_string(&payload)?;
    let at_str      = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (user_id, kind, payload, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, kind_str, payload_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Event { id, user_id: user_id.to_owned(), kind, payload, created_at })
  }

  async fn list_events(&self, user_id: &str, limit: usize) -> Result<Vec<Event>> {
    let id_str    = user_id.to_owned();
    let limit_val = i64::try_from(limit).unwrap_or(i64::MAX);

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user_id, kind, payload, created_at
           FROM events
           WHERE user_id = ?1
           ORDER BY id DESC
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![id_str, limit_val], |row| {
            Ok(RawEvent {
              id:         row.get(0)?,
              user_id:    row.get(1)?,
              kind:       row.get(2)?,
              payload:    row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  // ── Stats ─────────────────────────────────────────────────────────────────

  async fn record_mistakes(&self, user_id: &str, tally: MistakeTally) -> Result<bool> {
    let id_str = user_id.to_owned();

    let created = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let created = tx.execute(
          "INSERT INTO stats (user_id) VALUES (?1) ON CONFLICT(user_id) DO NOTHING",
          rusqlite::params![id_str],
        )? == 1;

        // One in-place update; never read-then-write.
        if !tally.is_empty() {
          tx.execute(
            "UPDATE stats SET
               mistakes_articles     = mistakes_articles     + ?2,
               mistakes_prepositions = mistakes_prepositions + ?3,
               mistakes_tenses       = mistakes_tenses       + ?4,
               mistakes_spelling     = mistakes_spelling     + ?5
             WHERE user_id = ?1",
            rusqlite::params![
              id_str,
              tally.articles,
              tally.prepositions,
              tally.tenses,
              tally.spelling,
            ],
          )?;
        }

        tx.commit()?;
        Ok(created)
      })
      .await?;

    if created {
      tracing::debug!(user_id, "created stats row");
    }
    Ok(created)
  }

  async fn get_stats(&self, user_id: &str) -> Result<Option<Stats>> {
    let id_str = user_id.to_owned();

    let stats = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT user_id, words_learned, mistakes_articles,
                    mistakes_prepositions, mistakes_tenses, mistakes_spelling
             FROM stats WHERE user_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(Stats {
                user_id:               row.get(0)?,
                words_learned:         row.get(1)?,
                mistakes_articles:     row.get(2)?,
                mistakes_prepositions: row.get(3)?,
                mistakes_tenses:       row.get(4)?,
                mistakes_spelling:     row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(stats)
  }
}
