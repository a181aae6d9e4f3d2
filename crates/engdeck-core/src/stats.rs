//! Per-user mistake statistics.
//!
//! One [`Stats`] record exists per user. Counters only ever go up: the core
//! increments them from grammar feedback and never decrements or resets them.

use serde::{Deserialize, Serialize};

// ─── Categories ──────────────────────────────────────────────────────────────

/// The mistake categories we keep counters for.
///
/// The model is told about a wider vocabulary (word choice, agreement,
/// punctuation, ...) but only these four feed statistics and exercise focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeCategory {
  Articles,
  Prepositions,
  Tenses,
  Spelling,
}

impl MistakeCategory {
  /// All categories in their fixed priority order.
  pub const ALL: [Self; 4] =
    [Self::Articles, Self::Prepositions, Self::Tenses, Self::Spelling];

  /// Map a free-text category from model output onto a counted category.
  ///
  /// Matching is a case-insensitive substring test, checked in priority
  /// order; the first hit wins. Anything else is not counted.
  pub fn classify(category: &str) -> Option<Self> {
    let lowered = category.to_lowercase();
    Self::ALL
      .into_iter()
      .find(|c| lowered.contains(c.pattern()))
  }

  fn pattern(self) -> &'static str {
    match self {
      Self::Articles => "article",
      Self::Prepositions => "preposition",
      Self::Tenses => "tense",
      Self::Spelling => "spelling",
    }
  }

  /// The label used in exercise prompts.
  pub fn label(self) -> &'static str {
    match self {
      Self::Articles => "Articles",
      Self::Prepositions => "Prepositions",
      Self::Tenses => "Tenses",
      Self::Spelling => "Spelling",
    }
  }
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// A snapshot of one user's counters.
///
/// Counters are `u64`: the columns grow without bound and are never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub user_id:               String,
  pub words_learned:         u64,
  pub mistakes_articles:     u64,
  pub mistakes_prepositions: u64,
  pub mistakes_tenses:       u64,
  pub mistakes_spelling:     u64,
}

impl Stats {
  /// An all-zero snapshot, used when a user has no stats row yet.
  pub fn empty(user_id: impl Into<String>) -> Self {
    Self { user_id: user_id.into(), ..Self::default() }
  }

  pub fn mistakes(&self, category: MistakeCategory) -> u64 {
    match category {
      MistakeCategory::Articles => self.mistakes_articles,
      MistakeCategory::Prepositions => self.mistakes_prepositions,
      MistakeCategory::Tenses => self.mistakes_tenses,
      MistakeCategory::Spelling => self.mistakes_spelling,
    }
  }
}

// ─── Tally ───────────────────────────────────────────────────────────────────

/// Increments to apply to a user's counters in one atomic update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MistakeTally {
  pub articles:     u32,
  pub prepositions: u32,
  pub tenses:       u32,
  pub spelling:     u32,
}

impl MistakeTally {
  /// Count one classified category.
  pub fn bump(&mut self, category: MistakeCategory) {
    let slot = match category {
      MistakeCategory::Articles => &mut self.articles,
      MistakeCategory::Prepositions => &mut self.prepositions,
      MistakeCategory::Tenses => &mut self.tenses,
      MistakeCategory::Spelling => &mut self.spelling,
    };
    *slot = slot.saturating_add(1);
  }

  /// Classify each category string and count the matches.
  pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a str>) -> Self {
    let mut tally = Self::default();
    for category in categories {
      if let Some(c) = MistakeCategory::classify(category) {
        tally.bump(c);
      }
    }
    tally
  }

  pub fn is_empty(&self) -> bool { self.total() == 0 }

  pub fn total(&self) -> u32 {
    self
      .articles
      .saturating_add(self.prepositions)
      .saturating_add(self.tenses)
      .saturating_add(self.spelling)
  }
}
