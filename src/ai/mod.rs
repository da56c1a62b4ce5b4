//! AI service integration for story generation
//!
//! Provides the story-generation interface and its OpenAI-compatible
//! implementation (Groq serves the same chat completions API).

pub mod json;
pub mod mock;
pub mod openai;

pub use json::clean_json_string;
pub use mock::MockStoryClient;
pub use openai::OpenAiStoryClient;

use crate::models::{StoryRequest, StoryResponse};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait StoryService: Send + Sync {
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryResponse>;
}
