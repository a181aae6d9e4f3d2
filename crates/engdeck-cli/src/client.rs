//! Async HTTP client wrapping the EngDeck JSON API.

use std::{path::Path, time::Duration};

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, multipart};
use serde_json::{Value, json};

/// Async HTTP client for the EngDeck API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    // Generation can take minutes on CPU.
    let client = Client::builder()
      .timeout(Duration::from_secs(300))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `POST /stt` with the file at `audio` as the upload.
  pub async fn stt(&self, user_id: &str, audio: &Path) -> Result<Value> {
    let bytes = tokio::fs::read(audio)
      .await
      .with_context(|| format!("reading {}", audio.display()))?;
    let file_name = audio
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "audio".to_string());

    let form = multipart::Form::new()
      .text("user_id", user_id.to_owned())
      .part("audio", multipart::Part::bytes(bytes).file_name(file_name));

    let resp = self
      .client
      .post(self.url("/stt"))
      .multipart(form)
      .send()
      .await
      .context("POST /stt failed")?;
    read_body(resp, "POST /stt").await
  }

  /// `POST /grammar`
  pub async fn grammar(&self, user_id: &str, text: &str) -> Result<Value> {
    let resp = self
      .client
      .post(self.url("/grammar"))
      .json(&json!({ "user_id": user_id, "text": text }))
      .send()
      .await
      .context("POST /grammar failed")?;
    read_body(resp, "POST /grammar").await
  }

  /// `POST /exercise`
  pub async fn exercise(&self, user_id: &str, limit: Option<u32>) -> Result<Value> {
    let mut body = json!({ "user_id": user_id });
    if let Some(limit) = limit {
      body["limit"] = json!(limit);
    }
    let resp = self
      .client
      .post(self.url("/exercise"))
      .json(&body)
      .send()
      .await
      .context("POST /exercise failed")?;
    read_body(resp, "POST /exercise").await
  }

  /// `GET /users/{user_id}/stats`
  pub async fn stats(&self, user_id: &str) -> Result<Value> {
    let resp = self
      .client
      .get(self.url(&format!("/users/{user_id}/stats")))
      .send()
      .await
      .context("GET stats failed")?;
    read_body(resp, "GET stats").await
  }

  /// `GET /users/{user_id}/events[?limit=N]`
  pub async fn events(&self, user_id: &str, limit: Option<usize>) -> Result<Value> {
    let mut req = self.client.get(self.url(&format!("/users/{user_id}/events")));
    if let Some(limit) = limit {
      req = req.query(&[("limit", limit)]);
    }
    let resp = req.send().await.context("GET events failed")?;
    read_body(resp, "GET events").await
  }
}

/// Decode a response body, turning `{"ok": false}` into an error.
async fn read_body(resp: Response, what: &str) -> Result<Value> {
  let status = resp.status();
  let body: Value = resp
    .json()
    .await
    .with_context(|| format!("{what} → {status}: body is not JSON"))?;
  check_ok(body).map_err(|e| anyhow!("{what} → {status}: {e}"))
}

fn check_ok(body: Value) -> Result<Value> {
  if body["ok"] == Value::Bool(true) {
    return Ok(body);
  }
  let message = body["error"].as_str().unwrap_or("unknown error");
  Err(anyhow!("{message}"))
}
