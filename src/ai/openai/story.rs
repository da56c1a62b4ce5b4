use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage, ResponseFormat};
use crate::ai::{clean_json_string, StoryService};
use crate::models::{Config, StoryRequest, StoryResponse};
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiStoryClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiStoryClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        Ok(Self {
            http: OpenAiHttpClient::new(api_key, base_url, timeout)?,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.groq_api_key.clone(),
            config.story_model.clone(),
            config.story_api_base_url.clone(),
            config.story_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Parse a model reply into a story, tolerating prose around the object.
pub fn parse_story(raw: &str) -> Result<StoryResponse> {
    let story: StoryResponse = serde_json::from_str(clean_json_string(raw))?;

    if !(2..=3).contains(&story.next_choices.len()) {
        tracing::warn!(
            "Model returned {} next choices, expected 2-3",
            story.next_choices.len()
        );
    }

    Ok(story)
}

#[async_trait]
impl StoryService for OpenAiStoryClient {
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryResponse> {
        tracing::info!("Generating story for {}...", request.genre);

        let chat_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::STORY_SYSTEM),
                ChatMessage::user(prompts::story_user_prompt(request)),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self.http.chat_completion(&chat_request).await?;

        let raw = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::AiProvider("No response from chat API".to_string()))?;

        parse_story(&raw)
    }
}
