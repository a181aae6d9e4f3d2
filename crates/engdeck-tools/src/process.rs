//! Running an external tool under a deadline.

use std::{
  ffi::{OsStr, OsString},
  process::{Output, Stdio},
  time::Duration,
};

use tokio::process::Command;

use crate::{Error, Result};

/// How many trailing stderr lines to keep in a [`Error::Failed`].
const STDERR_TAIL_LINES: usize = 8;

/// Run `program` with `args`, capturing its output.
///
/// The child is killed if it outlives `deadline` (or if the returned future
/// is dropped). A non-zero exit status is an error.
pub(crate) async fn run<I, S>(
  tool: &'static str,
  program: impl AsRef<OsStr>,
  args: I,
  deadline: Duration,
) -> Result<Output>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let program = program.as_ref();
  let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
  let mut cmd = Command::new(program);
  cmd
    .args(&args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

  tracing::debug!(
    tool,
    program = %program.to_string_lossy(),
    args = %loggable_args(&args),
    "running external tool"
  );

  let child = cmd.spawn().map_err(|source| Error::Spawn { tool, source })?;
  let output = tokio::time::timeout(deadline, child.wait_with_output())
    .await
    .map_err(|_| {
      tracing::warn!(tool, ?deadline, "external tool timed out");
      Error::Timeout { tool, after: deadline }
    })??;

  if !output.status.success() {
    let stderr = stderr_tail(&output.stderr);
    tracing::warn!(tool, status = %output.status, %stderr, "external tool failed");
    return Err(Error::Failed { tool, status: output.status, stderr });
  }

  Ok(output)
}

/// Arguments joined for logging, with the prompt after `-p` replaced by its
/// length.
fn loggable_args(args: &[OsString]) -> String {
  let mut shown = Vec::with_capacity(args.len());
  let mut after_flag = false;
  for arg in args {
    let text = arg.to_string_lossy();
    if after_flag {
      shown.push(format!("<prompt: {} chars>", text.chars().count()));
    } else {
      shown.push(text.into_owned());
    }
    after_flag = !after_flag && arg.as_os_str() == "-p";
  }
  shown.join(" ")
}

fn stderr_tail(stderr: &[u8]) -> String {
  let text = String::from_utf8_lossy(stderr);
  let lines: Vec<&str> = text
    .lines()
    .map(str::trim_end)
    .filter(|l| !l.is_empty())
    .collect();
  let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
  lines[start..].join("\n")
}
