//! `engdeck` — command-line client for the EngDeck server.
//!
//! # Usage
//!
//! ```
//! engdeck --user alice grammar "I goes to school."
//! engdeck --user alice stt recording.webm
//! engdeck --url http://tutor.local:8000 --user alice exercise --limit 3
//! ```

mod client;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::ApiClient;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "engdeck", about = "Client for the EngDeck language-learning server")]
struct Args {
  /// Base URL of the EngDeck server.
  #[arg(long, env = "ENGDECK_URL", default_value = "http://localhost:8000")]
  url: String,

  /// Learner id to act as.
  #[arg(short, long, env = "ENGDECK_USER")]
  user: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Transcribe an audio file.
  Stt { file: PathBuf },

  /// Check a sentence for grammar mistakes.
  Grammar { text: String },

  /// Request practice exercises aimed at recorded weak areas.
  Exercise {
    #[arg(short, long)]
    limit: Option<u32>,
  },

  /// Show mistake counters and the current exercise focus.
  Stats,

  /// Show recent activity, newest first.
  Events {
    #[arg(short, long)]
    limit: Option<usize>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let client = ApiClient::new(args.url)?;
  let user = args.user.as_str();

  let body = match args.command {
    Command::Stt { file } => client.stt(user, &file).await?,
    Command::Grammar { text } => client.grammar(user, &text).await?,
    Command::Exercise { limit } => client.exercise(user, limit).await?,
    Command::Stats => client.stats(user).await?,
    Command::Events { limit } => client.events(user, limit).await?,
  };

  println!("{}", serde_json::to_string_pretty(&body)?);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_grammar_command() {
    let args = Args::try_parse_from([
      "engdeck", "--url", "http://x:1", "--user", "alice", "grammar", "I goes",
    ])
    .unwrap();
    assert_eq!(args.url, "http://x:1");
    assert_eq!(args.user, "alice");
    assert!(matches!(args.command, Command::Grammar { ref text } if text == "I goes"));
  }

  #[test]
  fn parses_exercise_limit() {
    let args =
      Args::try_parse_from(["engdeck", "-u", "bob", "exercise", "--limit", "3"]).unwrap();
    assert!(matches!(args.command, Command::Exercise { limit: Some(3) }));
  }
}
