//! engdeck-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus any
//! `ENGDECK_*` environment variables, opens the SQLite store and serves the
//! JSON API over HTTP.
//!
//! ```
//! ENGDECK_PORT=9000 cargo run -p engdeck-server -- --config engdeck.toml
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use engdeck_server::ServerConfig;
use engdeck_store_sqlite::SqliteStore;
use engdeck_tools::{LlamaCli, WhisperCli};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "EngDeck language-learning server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ServerConfig::load(Some(cli.config.as_path()))
    .context("failed to load configuration")?;
  let store_path = expand_tilde(&cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let tools = cfg.tool_config();
  tokio::fs::create_dir_all(&tools.work_dir)
    .await
    .with_context(|| format!("failed to create work dir {:?}", tools.work_dir))?;

  // Missing models are reported per request; warn early so it isn't a surprise.
  for model in [&tools.whisper_model, &tools.llama_model] {
    if !model.exists() {
      tracing::warn!(path = %model.display(), "model file not found");
    }
  }

  let app = engdeck_server::app(
    store,
    WhisperCli::from_config(&tools),
    LlamaCli::from_config(&tools),
    &cfg,
  );

  let address = cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
