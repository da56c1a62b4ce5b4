//! Image proxying with failover
//!
//! Fetches an illustration for a text prompt from a generative image
//! service, falling back to a keyword stock-photo service when the first
//! one fails. Images are streamed through and never stored.

pub mod mime;
pub mod mock;
pub mod proxy;

pub use mock::MockImageService;
pub use proxy::ImageProxy;

use async_trait::async_trait;

/// Which upstream produced an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTier {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxiedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub tier: ImageTier,
}

impl ProxiedImage {
    pub fn new(bytes: Vec<u8>, tier: ImageTier) -> Self {
        let content_type = mime::detect_image_mime(&bytes);
        Self {
            bytes,
            content_type,
            tier,
        }
    }
}

#[async_trait]
pub trait ImageService: Send + Sync {
    /// Returns `None` once every upstream has failed.
    async fn fetch_image(&self, prompt: &str) -> Option<ProxiedImage>;
}
