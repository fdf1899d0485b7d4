//! prompt-relay - Text-generation relay service
//!
//! This library implements a single configurable HTTP service that accepts
//! user prompts (JSON API or Telegram webhook), admits them through a
//! per-client rate limiter, forwards them to a local text-generation backend,
//! and relays the generated text back to the caller.

pub mod admission;
pub mod api;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod config;
pub mod logging;
pub mod telegram;
pub mod validate;
