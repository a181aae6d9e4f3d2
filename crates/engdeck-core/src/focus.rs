//! Exercise focus planning.
//!
//! Turns a user's counters into the ordered list of weak areas the exercise
//! prompt targets.

use crate::stats::{MistakeCategory, Stats};

/// Used when a user has no recorded mistakes, so the exercise prompt never
/// has an empty focus list.
pub const DEFAULT_FOCUS: [MistakeCategory; 2] =
  [MistakeCategory::Articles, MistakeCategory::Prepositions];

/// Every category with at least one recorded mistake, in fixed order
/// (articles, prepositions, tenses, spelling); [`DEFAULT_FOCUS`] if none.
pub fn plan_focus(stats: &Stats) -> Vec<MistakeCategory> {
  let focus: Vec<_> = MistakeCategory::ALL
    .into_iter()
    .filter(|c| stats.mistakes(*c) > 0)
    .collect();

  if focus.is_empty() { DEFAULT_FOCUS.to_vec() } else { focus }
}

/// Join focus labels the way the exercise prompt expects them.
pub fn focus_labels(focus: &[MistakeCategory]) -> String {
  focus
    .iter()
    .map(|c| c.label())
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stats(articles: u64, prepositions: u64, tenses: u64, spelling: u64) -> Stats {
    Stats {
      user_id: "u".into(),
      words_learned: 0,
      mistakes_articles: articles,
      mistakes_prepositions: prepositions,
      mistakes_tenses: tenses,
      mistakes_spelling: spelling,
    }
  }

  #[test]
  fn no_mistakes_gives_default_focus() {
    assert_eq!(
      plan_focus(&stats(0, 0, 0, 0)),
      vec![MistakeCategory::Articles, MistakeCategory::Prepositions]
    );
  }

  #[test]
  fn only_tenses() {
    assert_eq!(plan_focus(&stats(0, 0, 3, 0)), vec![MistakeCategory::Tenses]);
  }

  #[test]
  fn keeps_fixed_order_regardless_of_counts() {
    assert_eq!(
      plan_focus(&stats(2, 0, 1, 0)),
      vec![MistakeCategory::Articles, MistakeCategory::Tenses]
    );
    assert_eq!(
      plan_focus(&stats(1, 9, 0, 4)),
      vec![
        MistakeCategory::Articles,
        MistakeCategory::Prepositions,
        MistakeCategory::Spelling
      ]
    );
  }

  #[test]
  fn words_learned_does_not_affect_focus() {
    let mut s = stats(0, 0, 0, 0);
    s.words_learned = 40;
    assert_eq!(plan_focus(&s), DEFAULT_FOCUS.to_vec());
  }

  #[test]
  fn labels_are_comma_joined() {
    assert_eq!(focus_labels(&DEFAULT_FOCUS), "Articles, Prepositions");
    assert_eq!(focus_labels(&[MistakeCategory::Spelling]), "Spelling");
  }
}
