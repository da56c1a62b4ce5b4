//! Backend for an interactive AI storyteller
//!
//! Forwards story-generation requests to an OpenAI-compatible chat API and
//! proxies illustration requests to external image services with failover.

pub mod ai;
pub mod api;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
