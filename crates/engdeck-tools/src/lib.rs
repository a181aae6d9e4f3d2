//! Process-backed engines for EngDeck.
//!
//! Every engine shells out to an external tool: `ffmpeg` for transcoding,
//! `whisper.cpp` for speech recognition and `llama.cpp` for generation. All
//! paths and deadlines come from an explicit [`ToolConfig`]; nothing here
//! reads the environment.

mod process;

pub mod config;
pub mod error;
pub mod llama;
pub mod transcode;
pub mod whisper;

pub use config::ToolConfig;
pub use error::{Error, Result};
pub use llama::LlamaCli;
pub use transcode::Transcoder;
pub use whisper::WhisperCli;

#[cfg(all(test, unix))]
mod testutil;
