//! SQL schema for the EngDeck SQLite store.
//!
//! Executed on every open; `CREATE ... IF NOT EXISTS` keeps it idempotent.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    created_at TEXT NOT NULL           -- RFC 3339 UTC
);

-- Events are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS events (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    TEXT NOT NULL,          -- soft reference to users(user_id)
    kind       TEXT NOT NULL,          -- 'stt' | 'grammar'
    payload    TEXT NOT NULL,          -- JSON
    created_at TEXT NOT NULL
);

-- One row per user; counters are only ever incremented in place.
CREATE TABLE IF NOT EXISTS stats (
    user_id               TEXT PRIMARY KEY,
    words_learned         INTEGER NOT NULL DEFAULT 0,
    mistakes_articles     INTEGER NOT NULL DEFAULT 0,
    mistakes_prepositions INTEGER NOT NULL DEFAULT 0,
    mistakes_tenses       INTEGER NOT NULL DEFAULT 0,
    mistakes_spelling     INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS events_user_idx ON events(user_id, id);

PRAGMA user_version = 1;
";
