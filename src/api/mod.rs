//! HTTP surface: routes, shared state and middleware.

mod handlers;

use crate::ai::{OpenAiStoryClient, StoryService};
use crate::image::{ImageProxy, ImageService};
use crate::models::Config;
use crate::Result;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::{generate_story, health, image_proxy, not_found};

/// Read-only state shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub story: Arc<dyn StoryService>,
    pub images: Arc<dyn ImageService>,
}

impl AppState {
    pub fn new(story: Arc<dyn StoryService>, images: Arc<dyn ImageService>) -> Self {
        Self { story, images }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let story = OpenAiStoryClient::from_config(config)?;
        tracing::info!(
            "Story provider: {} (model: {})",
            config.story_api_base_url,
            story.model()
        );

        let images = ImageProxy::from_config(config)?;
        tracing::info!(
            "Image tiers: primary {}, secondary {}",
            config.primary_image_base_url,
            config.secondary_image_base_url
        );

        Ok(Self::new(Arc::new(story), Arc::new(images)))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_story))
        .route("/image-proxy", get(image_proxy))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
