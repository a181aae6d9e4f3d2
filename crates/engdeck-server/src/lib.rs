//! EngDeck server assembly: configuration plus the HTTP middleware stack
//! wrapped around [`engdeck_api::api_router`].

pub mod config;

use std::sync::Arc;

use axum::Router;
use engdeck_api::{AppState, api_router};
use engdeck_core::{
  engine::{SpeechToText, TextGenerator},
  store::LearnerStore,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;

/// Build the full application: API routes, request tracing and, if enabled,
/// permissive CORS for browser clients.
pub fn app<S, T, G>(store: S, stt: T, llm: G, cfg: &ServerConfig) -> Router
where
  S: LearnerStore + 'static,
  T: SpeechToText + 'static,
  G: TextGenerator + 'static,
{
  let state = AppState {
    store:  Arc::new(store),
    stt:    Arc::new(stt),
    llm:    Arc::new(llm),
    config: Arc::new(cfg.api_config()),
  };

  let router = api_router(state).layer(TraceLayer::new_for_http());
  if cfg.cors_allow_any_origin {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}
