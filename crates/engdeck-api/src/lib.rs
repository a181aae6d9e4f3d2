//! JSON HTTP API for EngDeck.
//!
//! Exposes an axum [`Router`] backed by any [`LearnerStore`], any
//! [`SpeechToText`] engine and any [`TextGenerator`]. TLS, CORS and request
//! tracing are the caller's responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/stt` | Multipart: `user_id`, `audio` |
//! | `POST` | `/grammar` | `{"user_id", "text"}` |
//! | `POST` | `/exercise` | `{"user_id", "limit"?}` |
//! | `GET`  | `/users/{user_id}/stats` | |
//! | `GET`  | `/users/{user_id}/events` | |
//! | `GET`  | `/health` | |
//!
//! Every response body carries an `ok` flag.

pub mod error;
pub mod exercise;
pub mod grammar;
pub mod stt;
pub mod users;

use std::sync::Arc;

use axum::{
  Json, Router,
  extract::DefaultBodyLimit,
  http::{Method, Uri},
  routing::{get, post},
};
use engdeck_core::{engine::{SpeechToText, TextGenerator}, store::LearnerStore};
use serde_json::{Value, json};

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Limits enforced by the handlers.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Largest `limit` accepted by `POST /exercise`.
  pub max_exercise_limit: u32,
  /// Largest request body accepted, uploads included.
  pub max_upload_bytes:   usize,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      max_exercise_limit: 20,
      max_upload_bytes:   25 * 1024 * 1024,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, T, G> {
  pub store:  Arc<S>,
  pub stt:    Arc<T>,
  pub llm:    Arc<G>,
  pub config: Arc<ApiConfig>,
}

// Manual impl: cloning only bumps the `Arc`s, so the type parameters need
// not be `Clone`.
impl<S, T, G> Clone for AppState<S, T, G> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      stt:    Arc::clone(&self.stt),
      llm:    Arc::clone(&self.llm),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn api_router<S, T, G>(state: AppState<S, T, G>) -> Router<()>
where
  S: LearnerStore + 'static,
  T: SpeechToText + 'static,
  G: TextGenerator + 'static,
{
  let body_limit = state.config.max_upload_bytes;

  Router::new()
    .route("/health", get(health))
    .route("/stt", post(stt::handler::<S, T, G>))
    .route("/grammar", post(grammar::handler::<S, T, G>))
    .route("/exercise", post(exercise::handler::<S, T, G>))
    .route("/users/{user_id}/stats", get(users::stats::<S, T, G>))
    .route("/users/{user_id}/events", get(users::events::<S, T, G>))
    .method_not_allowed_fallback(method_not_allowed)
    .fallback(not_found)
    .layer(DefaultBodyLimit::max(body_limit))
    .with_state(state)
}

async fn health() -> Json<Value> { Json(json!({ "ok": true })) }

async fn not_found(uri: Uri) -> ApiError {
  ApiError::NotFound(format!("no route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
  ApiError::MethodNotAllowed(format!("{method} is not supported on {}", uri.path()))
}

// ─── Integration tests ────────────────────────────────────────────────────────
