//! Error type for `engdeck-tools`.

use std::{path::PathBuf, process::ExitStatus, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to start {tool}: {source}")]
  Spawn {
    tool:   &'static str,
    source: std::io::Error,
  },

  #[error("{tool} failed ({status}): {stderr}")]
  Failed {
    tool:   &'static str,
    status: ExitStatus,
    /// The last few lines of the tool's stderr.
    stderr: String,
  },

  #[error("{tool} did not finish within {after:?}")]
  Timeout {
    tool:  &'static str,
    after: Duration,
  },

  #[error("model artifact not found: {}", .0.display())]
  MissingArtifact(PathBuf),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
