//! Data models and configuration
//!
//! Defines the request/response bodies exposed over HTTP and the
//! process-wide configuration loaded from the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_STORY_API_BASE_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_STORY_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_PRIMARY_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_SECONDARY_IMAGE_BASE_URL: &str = "https://loremflickr.com";
pub const DEFAULT_IMAGE_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Body of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryRequest {
    pub premise: String,
    pub genre: String,
    /// Story so far, when the reader is continuing a narrative.
    #[serde(default)]
    pub context: Option<String>,
}

impl StoryRequest {
    /// Prior story text, if any. Empty strings count as no context.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref().filter(|c| !c.is_empty())
    }
}

/// One generated story segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryResponse {
    pub title: String,
    pub content: String,
    pub next_choices: Vec<String>,
}

/// Query string of `GET /image-proxy`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageQuery {
    pub prompt: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub story_api_base_url: String,
    pub story_model: String,
    /// `None` leaves the completion call unbounded.
    pub story_timeout: Option<Duration>,
    pub primary_image_base_url: String,
    pub secondary_image_base_url: String,
    pub image_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let groq_api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| crate::Error::Config("GROQ_API_KEY not set".to_string()))?;

        let story_timeout = lookup("STORY_TIMEOUT_SECS")
            .map(|raw| parse_timeout("STORY_TIMEOUT_SECS", &raw))
            .transpose()?;

        let image_timeout = lookup("IMAGE_TIMEOUT_SECS")
            .map(|raw| parse_timeout("IMAGE_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(Duration::from_secs(DEFAULT_IMAGE_TIMEOUT_SECS));

        let port = lookup("PORT")
            .map(|raw| parse_number::<u16>("PORT", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            groq_api_key,
            story_api_base_url: lookup("STORY_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_STORY_API_BASE_URL.to_string()),
            story_model: lookup("STORY_MODEL").unwrap_or_else(|| DEFAULT_STORY_MODEL.to_string()),
            story_timeout,
            primary_image_base_url: lookup("PRIMARY_IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PRIMARY_IMAGE_BASE_URL.to_string()),
            secondary_image_base_url: lookup("SECONDARY_IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SECONDARY_IMAGE_BASE_URL.to_string()),
            image_timeout,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> crate::Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| crate::Error::Config(format!("{} must be a number, got '{}'", key, raw)))
}

/// A zero timeout would fail every upstream call, so it is refused.
fn parse_timeout(key: &str, raw: &str) -> crate::Result<Duration> {
    match parse_number::<u64>(key, raw)? {
        0 => Err(crate::Error::Config(format!("{} must be at least 1", key))),
        secs => Ok(Duration::from_secs(secs)),
    }
}
