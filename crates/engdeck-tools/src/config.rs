//! Paths and deadlines for the external tools.

use std::{path::PathBuf, time::Duration};

/// Where the external tools live and how long each may run.
#[derive(Debug, Clone)]
pub struct ToolConfig {
  pub ffmpeg_bin:         PathBuf,
  pub whisper_bin:        PathBuf,
  pub whisper_model:      PathBuf,
  pub llama_bin:          PathBuf,
  pub llama_model:        PathBuf,
  /// Appended to every llama invocation, e.g. `--no-display-prompt`.
  pub llama_extra_args:   Vec<String>,
  /// Parent directory for per-request scratch directories.
  pub work_dir:           PathBuf,
  pub transcode_timeout:  Duration,
  pub transcribe_timeout: Duration,
  pub generate_timeout:   Duration,
}

impl Default for ToolConfig {
  fn default() -> Self {
    Self {
      ffmpeg_bin:         PathBuf::from("ffmpeg"),
      whisper_bin:        PathBuf::from("external/whisper.cpp/build/bin/whisper-cli"),
      whisper_model:      PathBuf::from("models/whisper/ggml-base.en.bin"),
      llama_bin:          PathBuf::from("external/llama.cpp/build/bin/llama-cli"),
      llama_model:        PathBuf::from("models/llm/TinyLlama-1.1B-Chat-v1.0.Q4_K_M.gguf"),
      llama_extra_args:   Vec::new(),
      work_dir:           std::env::temp_dir(),
      transcode_timeout:  Duration::from_secs(60),
      transcribe_timeout: Duration::from_secs(120),
      generate_timeout:   Duration::from_secs(180),
    }
  }
}
