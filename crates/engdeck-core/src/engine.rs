//! Traits for the external engines.
//!
//! Speech recognition and text generation run as opaque external processes.
//! The API layer only sees these traits; `engdeck-tools` provides the
//! process-backed implementations.

use std::future::Future;

use crate::prompt::SamplingParams;

/// An uploaded audio file, in whatever format the client sent.
#[derive(Debug, Clone)]
pub struct AudioUpload {
  /// The client-supplied file name, if any. Only used for its extension.
  pub file_name: Option<String>,
  pub bytes:     Vec<u8>,
}

/// Turns arbitrary audio into plain transcript text.
pub trait SpeechToText: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn transcribe<'a>(
    &'a self,
    audio: &'a AudioUpload,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

/// Runs a prompt through a generative model and returns its raw output.
pub trait TextGenerator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn generate<'a>(
    &'a self,
    prompt: &'a str,
    params: SamplingParams,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
