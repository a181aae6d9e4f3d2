//! Mistake statistics tracking.

use crate::{feedback::Issue, stats::MistakeTally, store::LearnerStore};

/// Fold a batch of issues into a user's counters.
///
/// Ensures the stats row exists, then increments one counter per issue whose
/// category matches a counted category. Unmatched issues are not counted.
/// Calling this twice with the same issues counts them twice.
pub async fn record_issues<S>(
  store: &S,
  user_id: &str,
  issues: &[Issue],
) -> Result<MistakeTally, S::Error>
where
  S: LearnerStore,
{
  let tally = MistakeTally::from_categories(issues.iter().map(|i| i.category.as_str()));
  let created = store.record_mistakes(user_id, tally).await?;
  tracing::debug!(
    user_id,
    created,
    counted = tally.total(),
    uncounted = u32::try_from(issues.len())
      .unwrap_or(u32::MAX)
      .saturating_sub(tally.total()),
    "recorded grammar issues"
  );
  Ok(tally)
}
