//! Integration tests for `SqliteStore` against an in-memory database.

use engdeck_core::{
  event::EventKind,
  feedback::{GrammarFeedback, Issue},
  stats::MistakeTally,
  store::LearnerStore,
  tracker::record_issues,
};
use serde_json::json;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn issue(category: &str) -> Issue {
  Issue {
    span:       "x".into(),
    category:   category.into(),
    message:    "m".into(),
    suggestion: "s".into(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_user_creates_once() {
  let s = store().await;

  assert!(s.ensure_user("alice").await.unwrap());
  assert!(!s.ensure_user("alice").await.unwrap());

  let user = s.get_user("alice").await.unwrap().unwrap();
  assert_eq!(user.user_id, "alice");
}

#[tokio::test]
async fn ensure_user_keeps_creation_time() {
  let s = store().await;
  s.ensure_user("alice").await.unwrap();
  let first = s.get_user("alice").await.unwrap().unwrap();

  s.ensure_user("alice").await.unwrap();
  let second = s.get_user("alice").await.unwrap().unwrap();
  assert_eq!(first.created_at, second.created_at);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user("nobody").await.unwrap().is_none());
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_event_assigns_increasing_ids() {
  let s = store().await;

  let a = s
    .append_event("alice", EventKind::Stt, json!({ "text": "hello" }))
    .await
    .unwrap();
  let b = s
    .append_event("alice", EventKind::Grammar, json!({ "corrected": "Hello.", "issues": [] }))
    .await
    .unwrap();

  assert!(b.id > a.id);
  assert_eq!(a.kind, EventKind::Stt);
  assert_eq!(b.payload["corrected"], "Hello.");
}

#[tokio::test]
async fn list_events_newest_first_with_limit() {
  let s = store().await;
  for n in 0..5 {
    s.append_event("alice", EventKind::Stt, json!({ "text": format!("t{n}") }))
      .await
      .unwrap();
  }
  s.append_event("bob", EventKind::Stt, json!({ "text": "other" }))
    .await
    .unwrap();

  let events = s.list_events("alice", 3).await.unwrap();
  assert_eq!(events.len(), 3);
  assert_eq!(events[0].payload["text"], "t4");
  assert_eq!(events[2].payload["text"], "t2");
  assert!(events.iter().all(|e| e.user_id == "alice"));
}

#[tokio::test]
async fn list_events_unknown_user_is_empty() {
  let s = store().await;
  assert!(s.list_events("nobody", 10).await.unwrap().is_empty());
}

// ─── Stats ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_stats_missing_returns_none() {
  let s = store().await;
  assert!(s.get_stats("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn record_mistakes_creates_row_even_for_empty_tally() {
  let s = store().await;

  assert!(s.record_mistakes("alice", MistakeTally::default()).await.unwrap());
  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 0);
  assert_eq!(stats.words_learned, 0);
}

#[tokio::test]
async fn record_mistakes_is_additive_and_never_overwrites() {
  let s = store().await;
  let tally = MistakeTally { articles: 2, prepositions: 0, tenses: 1, spelling: 0 };

  assert!(s.record_mistakes("alice", tally).await.unwrap());
  assert!(!s.record_mistakes("alice", tally).await.unwrap());
  assert!(!s.record_mistakes("alice", MistakeTally::default()).await.unwrap());

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 4);
  assert_eq!(stats.mistakes_prepositions, 0);
  assert_eq!(stats.mistakes_tenses, 2);
  assert_eq!(stats.mistakes_spelling, 0);
}

#[tokio::test]
async fn counters_grow_past_u32() {
  let s = store().await;
  let tally = MistakeTally { articles: u32::MAX, ..Default::default() };

  s.record_mistakes("alice", tally).await.unwrap();
  s.record_mistakes("alice", tally).await.unwrap();

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 2 * u64::from(u32::MAX));
}

#[tokio::test]
async fn stats_are_per_user() {
  let s = store().await;
  s.record_mistakes("alice", MistakeTally { spelling: 1, ..Default::default() })
    .await
    .unwrap();
  s.record_mistakes("bob", MistakeTally { tenses: 3, ..Default::default() })
    .await
    .unwrap();

  let alice = s.get_stats("alice").await.unwrap().unwrap();
  let bob = s.get_stats("bob").await.unwrap().unwrap();
  assert_eq!((alice.mistakes_spelling, alice.mistakes_tenses), (1, 0));
  assert_eq!((bob.mistakes_spelling, bob.mistakes_tenses), (0, 3));
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
  let s = store().await;

  let handles: Vec<_> = (0..20)
    .map(|_| {
      let s = s.clone();
      tokio::spawn(async move {
        s.record_mistakes("alice", MistakeTally { articles: 1, ..Default::default() })
          .await
          .unwrap()
      })
    })
    .collect();

  let mut created = 0;
  for h in handles {
    if h.await.unwrap() {
      created += 1;
    }
  }

  assert_eq!(created, 1);
  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 20);
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn record_issues_counts_matching_categories() {
  let s = store().await;
  let issues = [
    issue("Articles"),
    issue("preposition"),
    issue("WordChoice"),
    issue("Punctuation"),
    issue("SPELLING"),
    issue("tenses"),
  ];

  let tally = record_issues(&s, "alice", &issues).await.unwrap();
  assert_eq!(tally.total(), 4);

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 1);
  assert_eq!(stats.mistakes_prepositions, 1);
  assert_eq!(stats.mistakes_tenses, 1);
  assert_eq!(stats.mistakes_spelling, 1);
}

#[tokio::test]
async fn record_issues_twice_doubles_counters() {
  let s = store().await;
  let issues = [issue("Tenses"), issue("Articles")];

  record_issues(&s, "alice", &issues).await.unwrap();
  record_issues(&s, "alice", &issues).await.unwrap();

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_tenses, 2);
  assert_eq!(stats.mistakes_articles, 2);
}

#[tokio::test]
async fn grammar_scenario_bumps_tenses() {
  let s = store().await;
  let raw = r#"Sure! {"corrected": "I go to school.", "issues": [{"span":"go","category":"Tenses","message":"wrong tense","suggestion":"went"}]} Hope that helps!"#;

  let fb = GrammarFeedback::from_model_output(raw, "I goes to school.");
  record_issues(&s, "alice", &fb.issues).await.unwrap();

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_tenses, 1);
  assert_eq!(stats.mistakes_articles + stats.mistakes_prepositions + stats.mistakes_spelling, 0);
}

#[tokio::test]
async fn fallback_feedback_leaves_counters_unchanged() {
  let s = store().await;
  s.record_mistakes("alice", MistakeTally { articles: 1, ..Default::default() })
    .await
    .unwrap();

  let fb = GrammarFeedback::from_model_output("I cannot help with that.", "text");
  record_issues(&s, "alice", &fb.issues).await.unwrap();

  let stats = s.get_stats("alice").await.unwrap().unwrap();
  assert_eq!(stats.mistakes_articles, 1);
  assert_eq!(stats.mistakes_tenses, 0);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_data() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("engdeck.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.ensure_user("alice").await.unwrap();
    s.record_mistakes("alice", MistakeTally { tenses: 2, ..Default::default() })
      .await
      .unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(!s.ensure_user("alice").await.unwrap());
  assert_eq!(s.get_stats("alice").await.unwrap().unwrap().mistakes_tenses, 2);
}
