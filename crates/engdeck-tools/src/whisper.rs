//! Speech recognition via `whisper.cpp`.

use std::{
  ffi::OsString,
  path::{Path, PathBuf},
  time::Duration,
};

use engdeck_core::engine::{AudioUpload, SpeechToText};

use crate::{process, transcode::Transcoder, Error, Result, ToolConfig};

/// Transcribes uploads by transcoding them with [`Transcoder`] and running
/// `whisper-cli` on the result.
///
/// Each call works in its own scratch directory under `work_dir`. The upload,
/// the WAV file and the transcript side-file all live there, and the
/// directory is removed when the call returns, whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct WhisperCli {
  transcoder: Transcoder,
  bin:        PathBuf,
  model:      PathBuf,
  work_dir:   PathBuf,
  timeout:    Duration,
}

impl WhisperCli {
  pub fn from_config(config: &ToolConfig) -> Self {
    Self {
      transcoder: Transcoder::new(&config.ffmpeg_bin, config.transcode_timeout),
      bin:        config.whisper_bin.clone(),
      model:      config.whisper_model.clone(),
      work_dir:   config.work_dir.clone(),
      timeout:    config.transcribe_timeout,
    }
  }

  async fn run_whisper(&self, wav: &Path) -> Result<String> {
    if !tokio::fs::try_exists(&self.model).await.unwrap_or(false) {
      return Err(Error::MissingArtifact(self.model.clone()));
    }

    let out_base = wav.with_extension("out");
    process::run("whisper", &self.bin, args(&self.model, wav, &out_base), self.timeout).await?;

    // whisper-cli appends `.txt` to the `-of` base name.
    let mut txt = out_base.into_os_string();
    txt.push(".txt");
    let text = tokio::fs::read_to_string(PathBuf::from(txt)).await?;
    Ok(text.trim().to_owned())
  }
}

impl SpeechToText for WhisperCli {
  type Error = Error;

  async fn transcribe(&self, audio: &AudioUpload) -> Result<String> {
    let scratch = tempfile::Builder::new()
      .prefix("engdeck-stt-")
      .tempdir_in(&self.work_dir)?;

    let upload = scratch
      .path()
      .join(format!("upload.{}", upload_extension(audio.file_name.as_deref())));
    tokio::fs::write(&upload, &audio.bytes).await?;

    let wav = scratch.path().join("audio.wav");
    self.transcoder.to_wav(&upload, &wav).await?;
    let text = self.run_whisper(&wav).await?;

    tracing::debug!(bytes = audio.bytes.len(), chars = text.len(), "transcribed upload");
    Ok(text)
  }
}

fn args(model: &Path, wav: &Path, out_base: &Path) -> Vec<OsString> {
  vec![
    "-m".into(),
    model.into(),
    "-f".into(),
    wav.into(),
    "-otxt".into(),
    "-of".into(),
    out_base.into(),
  ]
}

/// A safe extension for the stored upload. The client's file name is never
/// used as a path; only a short alphanumeric extension survives.
fn upload_extension(file_name: Option<&str>) -> String {
  file_name
    .and_then(|n| Path::new(n).extension())
    .and_then(|e| e.to_str())
    .filter(|e| !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric()))
    .map(str::to_ascii_lowercase)
    .unwrap_or_else(|| "bin".to_owned())
}
