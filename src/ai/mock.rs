use super::StoryService;
use crate::models::{StoryRequest, StoryResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockReply {
    Story(StoryResponse),
    Failure(String),
}

#[derive(Clone)]
pub struct MockStoryClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<StoryRequest>>>,
}

impl MockStoryClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_story(self, story: StoryResponse) -> Self {
        self.replies.lock().unwrap().push(MockReply::Story(story));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.replies.lock().unwrap().push(MockReply::Failure(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received so far, oldest first.
    pub fn get_requests(&self) -> Vec<StoryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockStoryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoryService for MockStoryClient {
    async fn generate_story(&self, request: &StoryRequest) -> Result<StoryResponse> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock story
            return Ok(StoryResponse {
                title: format!("A {} tale", request.genre),
                content: request.premise.clone(),
                next_choices: vec!["Go left".to_string(), "Go right".to_string()],
            });
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Story(story) => Ok(story.clone()),
            MockReply::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
