use super::{ImageService, ImageTier, ProxiedImage};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockImageService {
    image: Option<ProxiedImage>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockImageService {
    pub fn new() -> Self {
        Self {
            image: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_image(mut self, bytes: Vec<u8>, tier: ImageTier) -> Self {
        self.image = Some(ProxiedImage::new(bytes, tier));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageService for MockImageService {
    async fn fetch_image(&self, prompt: &str) -> Option<ProxiedImage> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.image.clone()
    }
}
