//! Core types and logic for the EngDeck language-learning backend.
//!
//! This crate is free of HTTP, database and process dependencies. It owns the
//! deterministic pieces that wrap the language model: prompts, extraction of
//! the JSON payload from raw model output, mistake classification and
//! exercise focus planning. The storage backend and the external engines are
//! reached through the traits in [`store`] and [`engine`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod engine;
pub mod error;
pub mod event;
pub mod extract;
pub mod feedback;
pub mod focus;
pub mod prompt;
pub mod stats;
pub mod store;
pub mod tracker;
pub mod user;

pub use error::{Error, Result};
