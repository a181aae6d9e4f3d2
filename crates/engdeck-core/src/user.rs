//! User — an opaque identity created implicitly on first interaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A learner. Nothing about a user changes after creation; everything we know
/// about their progress lives in [`crate::stats::Stats`] and the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    String,
  pub created_at: DateTime<Utc>,
}
