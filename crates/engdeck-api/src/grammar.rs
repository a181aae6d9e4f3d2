//! Handler for `POST /grammar`.
//!
//! Body `{"user_id": "...", "text": "..."}`. Responds
//! `{"ok": true, "corrected": "...", "issues": [...]}`. Undecodable model
//! output is not an error: the text is echoed back with no issues.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use engdeck_core::{
  engine::TextGenerator,
  event::EventKind,
  feedback::GrammarFeedback,
  prompt::{SamplingParams, grammar_prompt},
  store::LearnerStore,
  tracker::record_issues,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::{ApiError, require_user_id}};

#[derive(Debug, Deserialize)]
pub struct GrammarRequest {
  pub user_id: String,
  pub text:    String,
}

#[derive(Debug, Serialize)]
pub struct GrammarResponse {
  pub ok:       bool,
  #[serde(flatten)]
  pub feedback: GrammarFeedback,
}

/// `POST /grammar`
pub async fn handler<S, T, G>(
  State(state): State<AppState<S, T, G>>,
  body: Result<Json<GrammarRequest>, JsonRejection>,
) -> Result<Json<GrammarResponse>, ApiError>
where
  S: LearnerStore + 'static,
  T: Send + Sync + 'static,
  G: TextGenerator + 'static,
{
  let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let user_id = require_user_id(&req.user_id)?;

  let raw = state
    .llm
    .generate(&grammar_prompt(&req.text), SamplingParams::DEFAULT)
    .await
    .map_err(ApiError::engine)?;
  let feedback = GrammarFeedback::from_model_output(&raw, &req.text);

  state.store.ensure_user(user_id).await.map_err(ApiError::store)?;
  let tally = record_issues(state.store.as_ref(), user_id, &feedback.issues)
    .await
    .map_err(ApiError::store)?;
  state
    .store
    .append_event(
      user_id,
      EventKind::Grammar,
      serde_json::Value::Object(feedback.to_payload()),
    )
    .await
    .map_err(ApiError::store)?;

  tracing::info!(
    user_id,
    issues = feedback.issues.len(),
    counted = tally.total(),
    "grammar feedback"
  );
  Ok(Json(GrammarResponse { ok: true, feedback }))
}
