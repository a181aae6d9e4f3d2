//! Audio normalisation via `ffmpeg`.

use std::{ffi::OsString, path::{Path, PathBuf}, time::Duration};

use crate::{process, Result};

/// Sample rate expected by the speech-recognition engine.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Converts arbitrary audio into a mono 16 kHz WAV file.
#[derive(Debug, Clone)]
pub struct Transcoder {
  bin:     PathBuf,
  timeout: Duration,
}

impl Transcoder {
  pub fn new(bin: impl Into<PathBuf>, timeout: Duration) -> Self {
    Self { bin: bin.into(), timeout }
  }

  /// Transcode `input` into `output`, overwriting it if present.
  pub async fn to_wav(&self, input: &Path, output: &Path) -> Result<()> {
    process::run("ffmpeg", &self.bin, args(input, output), self.timeout).await?;
    Ok(())
  }
}

fn args(input: &Path, output: &Path) -> Vec<OsString> {
  vec![
    "-y".into(),
    "-i".into(),
    input.into(),
    "-ac".into(),
    "1".into(),
    "-ar".into(),
    SAMPLE_RATE_HZ.to_string().into(),
    output.into(),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn args_request_mono_16k() {
    let a = args(Path::new("/tmp/in.webm"), Path::new("/tmp/out.wav"));
    assert_eq!(
      a,
      ["-y", "-i", "/tmp/in.webm", "-ac", "1", "-ar", "16000", "/tmp/out.wav"]
        .map(OsString::from)
        .to_vec()
    );
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn failing_ffmpeg_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let bin = crate::testutil::script(dir.path(), "ffmpeg", "echo 'Invalid data' >&2\nexit 1");
    let t = Transcoder::new(bin, Duration::from_secs(5));

    let err = t
      .to_wav(&dir.path().join("in"), &dir.path().join("out.wav"))
      .await
      .unwrap_err();
    assert!(err.to_string().contains("Invalid data"), "{err}");
  }
}
