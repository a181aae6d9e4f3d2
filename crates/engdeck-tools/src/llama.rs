//! Text generation via `llama.cpp`.

use std::{ffi::OsString, path::PathBuf, time::Duration};

use engdeck_core::{engine::TextGenerator, prompt::SamplingParams};

use crate::{process, Error, Result, ToolConfig};

/// Runs `llama-cli` once per prompt and returns what it printed.
#[derive(Debug, Clone)]
pub struct LlamaCli {
  bin:        PathBuf,
  model:      PathBuf,
  extra_args: Vec<String>,
  timeout:    Duration,
}

impl LlamaCli {
  pub fn from_config(config: &ToolConfig) -> Self {
    Self {
      bin:        config.llama_bin.clone(),
      model:      config.llama_model.clone(),
      extra_args: config.llama_extra_args.clone(),
      timeout:    config.generate_timeout,
    }
  }

  fn args(&self, prompt: &str, params: SamplingParams) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
      "-m".into(),
      self.model.clone().into(),
      "-p".into(),
      prompt.into(),
      "-n".into(),
      params.max_tokens.to_string().into(),
      "--temp".into(),
      params.temperature.to_string().into(),
      "--top-k".into(),
      params.top_k.to_string().into(),
      "--top-p".into(),
      params.top_p.to_string().into(),
      "--repeat-penalty".into(),
      params.repeat_penalty.to_string().into(),
    ];
    args.extend(self.extra_args.iter().map(OsString::from));
    args
  }
}

impl TextGenerator for LlamaCli {
  type Error = Error;

  async fn generate(&self, prompt: &str, params: SamplingParams) -> Result<String> {
    if !tokio::fs::try_exists(&self.model).await.unwrap_or(false) {
      return Err(Error::MissingArtifact(self.model.clone()));
    }

    let output = process::run("llama", &self.bin, self.args(prompt, params), self.timeout).await?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = strip_echoed_prompt(&stdout, prompt).to_owned();

    tracing::debug!(prompt_chars = prompt.len(), output_chars = text.len(), "generation finished");
    Ok(text)
  }
}

/// `llama-cli` echoes the prompt before the completion unless told not to.
/// The prompt's own braces would otherwise be picked up by extraction.
fn strip_echoed_prompt<'a>(stdout: &'a str, prompt: &str) -> &'a str {
  match stdout.find(prompt) {
    Some(at) => &stdout[at + prompt.len()..],
    None => stdout,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cli(model: PathBuf) -> LlamaCli {
    LlamaCli::from_config(&ToolConfig {
      llama_model: model,
      llama_extra_args: vec!["--no-display-prompt".into()],
      ..ToolConfig::default()
    })
  }

  #[test]
  fn args_carry_sampling_params() {
    let args = cli(PathBuf::from("m.gguf")).args("P", SamplingParams::DEFAULT);
    let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(
      args,
      [
        "-m", "m.gguf", "-p", "P", "-n", "256", "--temp", "0.2", "--top-k", "20",
        "--top-p", "0.95", "--repeat-penalty", "1.05", "--no-display-prompt",
      ]
    );
  }

  #[test]
  fn echoed_prompt_is_stripped() {
    let prompt = "Return {a, b}.\nTeacher (JSON):\n";
    let stdout = format!("<s> {prompt}{{\"a\": 1}}");
    assert_eq!(strip_echoed_prompt(&stdout, prompt), "{\"a\": 1}");
    assert_eq!(strip_echoed_prompt("{\"a\": 1}", prompt), "{\"a\": 1}");
  }

  #[cfg(unix)]
  mod process_backed {
    use super::*;
    use crate::testutil::script;

    #[tokio::test]
    async fn generate_returns_completion_only() {
      let dir = tempfile::tempdir().unwrap();
      let model = dir.path().join("m.gguf");
      std::fs::write(&model, b"weights").unwrap();

      let mut llama = cli(model);
      llama.bin = script(dir.path(), "llama", "printf '%s' \"$4\"\necho '{\"ok\": true}'");

      let out = llama.generate("Say {x}:", SamplingParams::DEFAULT).await.unwrap();
      assert_eq!(out, "{\"ok\": true}\n");
    }

    #[tokio::test]
    async fn missing_model_is_reported() {
      let dir = tempfile::tempdir().unwrap();
      let llama = cli(dir.path().join("absent.gguf"));

      let err = llama.generate("hi", SamplingParams::DEFAULT).await.unwrap_err();
      assert!(matches!(err, Error::MissingArtifact(_)));
    }
  }
}
