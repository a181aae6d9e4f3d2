//! Server configuration, read from TOML and `ENGDECK_*` environment variables.

use std::{path::PathBuf, time::Duration};

use engdeck_api::ApiConfig;
use engdeck_tools::ToolConfig;
use serde::Deserialize;

/// Everything the server binary needs. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                    String,
  pub port:                    u16,
  pub store_path:              PathBuf,

  pub ffmpeg_bin:              PathBuf,
  pub whisper_bin:             PathBuf,
  pub whisper_model:           PathBuf,
  pub llama_bin:               PathBuf,
  pub llama_model:             PathBuf,
  pub llama_extra_args:        Vec<String>,
  /// Parent of the per-request scratch directories; the system temp dir if
  /// unset.
  pub work_dir:                Option<PathBuf>,

  pub transcode_timeout_secs:  u64,
  pub transcribe_timeout_secs: u64,
  pub generate_timeout_secs:   u64,

  pub max_exercise_limit:      u32,
  pub max_upload_bytes:        usize,
  pub cors_allow_any_origin:   bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let tools = ToolConfig::default();
    let api = ApiConfig::default();
    Self {
      host:                    "127.0.0.1".to_string(),
      port:                    8000,
      store_path:              PathBuf::from("engdeck.db"),
      ffmpeg_bin:              tools.ffmpeg_bin,
      whisper_bin:             tools.whisper_bin,
      whisper_model:           tools.whisper_model,
      llama_bin:               tools.llama_bin,
      llama_model:             tools.llama_model,
      llama_extra_args:        tools.llama_extra_args,
      work_dir:                None,
      transcode_timeout_secs:  tools.transcode_timeout.as_secs(),
      transcribe_timeout_secs: tools.transcribe_timeout.as_secs(),
      generate_timeout_secs:   tools.generate_timeout.as_secs(),
      max_exercise_limit:      api.max_exercise_limit,
      max_upload_bytes:        api.max_upload_bytes,
      cors_allow_any_origin:   true,
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file, then overlay `ENGDECK_*` variables.
  pub fn load(file: Option<&std::path::Path>) -> Result<Self, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(false));
    }
    builder
      .add_source(config::Environment::with_prefix("ENGDECK"))
      .build()?
      .try_deserialize()
  }

  pub fn tool_config(&self) -> ToolConfig {
    ToolConfig {
      ffmpeg_bin:         self.ffmpeg_bin.clone(),
      whisper_bin:        self.whisper_bin.clone(),
      whisper_model:      self.whisper_model.clone(),
      llama_bin:          self.llama_bin.clone(),
      llama_model:        self.llama_model.clone(),
      llama_extra_args:   self.llama_extra_args.clone(),
      work_dir:           self.work_dir.clone().unwrap_or_else(std::env::temp_dir),
      transcode_timeout:  Duration::from_secs(self.transcode_timeout_secs),
      transcribe_timeout: Duration::from_secs(self.transcribe_timeout_secs),
      generate_timeout:   Duration::from_secs(self.generate_timeout_secs),
    }
  }

  pub fn api_config(&self) -> ApiConfig {
    ApiConfig {
      max_exercise_limit: self.max_exercise_limit,
      max_upload_bytes:   self.max_upload_bytes,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
