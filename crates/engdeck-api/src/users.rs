//! Read-only handlers under `/users/{user_id}`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users/{user_id}/stats` | All-zero counters if nothing recorded yet |
//! | `GET`  | `/users/{user_id}/events` | Newest first; `?limit=` (default 50, max 500) |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use engdeck_core::{
  event::Event,
  focus::plan_focus,
  stats::{MistakeCategory, Stats},
  store::LearnerStore,
  user::User,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::{ApiError, require_user_id}};

const DEFAULT_EVENT_LIMIT: usize = 50;
const MAX_EVENT_LIMIT: usize = 500;

// ─── Stats ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatsResponse {
  pub ok:    bool,
  /// `None` until the user's first transcription or grammar check.
  pub user:  Option<User>,
  pub stats: Stats,
  /// What the next exercise request would focus on.
  pub focus: Vec<MistakeCategory>,
}

/// `GET /users/{user_id}/stats`
pub async fn stats<S, T, G>(
  State(state): State<AppState<S, T, G>>,
  Path(user_id): Path<String>,
) -> Result<Json<StatsResponse>, ApiError>
where
  S: LearnerStore + 'static,
  T: Send + Sync + 'static,
  G: Send + Sync + 'static,
{
  let user_id = require_user_id(&user_id)?;
  let user = state.store.get_user(user_id).await.map_err(ApiError::store)?;
  let stats = state
    .store
    .get_stats(user_id)
    .await
    .map_err(ApiError::store)?
    .unwrap_or_else(|| Stats::empty(user_id));
  let focus = plan_focus(&stats);
  Ok(Json(StatsResponse { ok: true, user, stats, focus }))
}

// ─── Events ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EventParams {
  pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
  pub ok:     bool,
  pub events: Vec<Event>,
}

/// `GET /users/{user_id}/events[?limit=N]`
pub async fn events<S, T, G>(
  State(state): State<AppState<S, T, G>>,
  Path(user_id): Path<String>,
  Query(params): Query<EventParams>,
) -> Result<Json<EventsResponse>, ApiError>
where
  S: LearnerStore + 'static,
  T: Send + Sync + 'static,
  G: Send + Sync + 'static,
{
  let user_id = require_user_id(&user_id)?;
  let limit = params.limit.unwrap_or(DEFAULT_EVENT_LIMIT).min(MAX_EVENT_LIMIT);
  let events = state
    .store
    .list_events(user_id, limit)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(EventsResponse { ok: true, events }))
}
