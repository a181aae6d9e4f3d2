//! Handler for `POST /stt`.
//!
//! Multipart form with a `user_id` text field and an `audio` file field.
//! Responds `{"ok": true, "text": "..."}`.

use axum::{
  Json,
  extract::{
    Multipart, State,
    multipart::{MultipartError, MultipartRejection},
  },
  http::StatusCode,
};
use engdeck_core::{
  engine::{AudioUpload, SpeechToText},
  event::EventKind,
  store::LearnerStore,
};
use serde::Serialize;
use serde_json::json;

use crate::{AppState, error::{ApiError, require_user_id}};

#[derive(Debug, Serialize)]
pub struct SttResponse {
  pub ok:   bool,
  pub text: String,
}

/// The parts of the form we care about.
struct SttForm {
  user_id: String,
  audio:   AudioUpload,
}

async fn read_form(mut multipart: Multipart) -> Result<SttForm, ApiError> {
  let bad = |e: MultipartError| {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
      ApiError::PayloadTooLarge(e.body_text())
    } else {
      ApiError::BadRequest(format!("failed to read multipart: {e}"))
    }
  };

  let mut user_id = None;
  let mut audio = None;

  while let Some(field) = multipart.next_field().await.map_err(bad)? {
    match field.name() {
      Some("user_id") => user_id = Some(field.text().await.map_err(bad)?),
      Some("audio") => {
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await.map_err(bad)?.to_vec();
        audio = Some(AudioUpload { file_name, bytes });
      }
      _ => {}
    }
  }

  let user_id = user_id.ok_or_else(|| ApiError::BadRequest("missing field: user_id".to_owned()))?;
  let audio = audio.ok_or_else(|| ApiError::BadRequest("missing field: audio".to_owned()))?;
  if audio.bytes.is_empty() {
    return Err(ApiError::BadRequest("audio is empty".to_owned()));
  }
  Ok(SttForm { user_id, audio })
}

/// `POST /stt`
pub async fn handler<S, T, G>(
  State(state): State<AppState<S, T, G>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SttResponse>, ApiError>
where
  S: LearnerStore + 'static,
  T: SpeechToText + 'static,
  G: Send + Sync + 'static,
{
  let multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let form = read_form(multipart).await?;
  let user_id = require_user_id(&form.user_id)?;

  let text = state.stt.transcribe(&form.audio).await.map_err(ApiError::engine)?;

  let created = state.store.ensure_user(user_id).await.map_err(ApiError::store)?;
  if created {
    tracing::debug!(user_id, "new user");
  }
  state
    .store
    .append_event(user_id, EventKind::Stt, json!({ "text": text }))
    .await
    .map_err(ApiError::store)?;

  Ok(Json(SttResponse { ok: true, text }))
}
