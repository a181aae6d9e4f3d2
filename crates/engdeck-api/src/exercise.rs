//! Handler for `POST /exercise`.
//!
//! Body `{"user_id": "...", "limit": 5}`. Responds
//! `{"ok": true, "exercises": [...]}`, aimed at the user's weakest areas.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use engdeck_core::{
  engine::TextGenerator,
  feedback::ExerciseSet,
  focus::plan_focus,
  prompt::{SamplingParams, exercise_prompt},
  stats::Stats,
  store::LearnerStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::{ApiError, require_user_id}};

pub const DEFAULT_LIMIT: u32 = 5;

fn default_limit() -> u32 { DEFAULT_LIMIT }

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
  pub user_id: String,
  #[serde(default = "default_limit")]
  pub limit:   u32,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
  pub ok:  bool,
  #[serde(flatten)]
  pub set: ExerciseSet,
}

/// `POST /exercise`
pub async fn handler<S, T, G>(
  State(state): State<AppState<S, T, G>>,
  body: Result<Json<ExerciseRequest>, JsonRejection>,
) -> Result<Json<ExerciseResponse>, ApiError>
where
  S: LearnerStore + 'static,
  T: Send + Sync + 'static,
  G: TextGenerator + 'static,
{
  let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let user_id = require_user_id(&req.user_id)?;
  let max = state.config.max_exercise_limit;
  if req.limit == 0 || req.limit > max {
    return Err(ApiError::BadRequest(format!("limit must be between 1 and {max}")));
  }

  let stats = state
    .store
    .get_stats(user_id)
    .await
    .map_err(ApiError::store)?
    .unwrap_or_else(|| Stats::empty(user_id));
  let focus = plan_focus(&stats);

  let raw = state
    .llm
    .generate(&exercise_prompt(&focus, req.limit), SamplingParams::DEFAULT)
    .await
    .map_err(ApiError::engine)?;
  let set = ExerciseSet::from_model_output(&raw);

  tracing::info!(user_id, ?focus, exercises = set.exercises.len(), "generated exercises");
  Ok(Json(ExerciseResponse { ok: true, set }))
}
