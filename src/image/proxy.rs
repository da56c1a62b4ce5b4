use super::{ImageService, ImageTier, ProxiedImage};
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 512;
pub const FALLBACK_KEYWORD: &str = "fantasy";

/// Some image hosts refuse requests without a browser user agent.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Two-tier image fetcher: generative service first, stock photos second.
pub struct ImageProxy {
    client: Client,
    primary_base_url: String,
    secondary_base_url: String,
}

impl ImageProxy {
    pub fn new(
        primary_base_url: String,
        secondary_base_url: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            primary_base_url: primary_base_url.trim_end_matches('/').to_string(),
            secondary_base_url: secondary_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.primary_image_base_url.clone(),
            config.secondary_image_base_url.clone(),
            config.image_timeout,
        )
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(Error::ImageSource(format!(
                "status {} from {}",
                response.status(),
                url
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Search keyword for the stock-photo tier.
///
/// The first whitespace-separated token when the prompt has whitespace,
/// otherwise [`FALLBACK_KEYWORD`].
pub fn fallback_keyword(prompt: &str) -> &str {
    if !prompt.contains(char::is_whitespace) {
        return FALLBACK_KEYWORD;
    }
    prompt.split_whitespace().next().unwrap_or(FALLBACK_KEYWORD)
}

pub fn primary_url(base_url: &str, prompt: &str) -> String {
    format!(
        "{}/prompt/{}?width={}&height={}&nologo=true",
        base_url,
        urlencoding::encode(prompt),
        IMAGE_WIDTH,
        IMAGE_HEIGHT
    )
}

pub fn secondary_url(base_url: &str, keyword: &str, lock: u32) -> String {
    format!(
        "{}/{}/{}/{}?lock={}",
        base_url,
        IMAGE_WIDTH,
        IMAGE_HEIGHT,
        urlencoding::encode(keyword),
        lock
    )
}

/// Random `lock` value so the stock service does not hand back a cached photo.
fn cache_buster() -> u32 {
    rand::thread_rng().gen_range(1..=1000)
}

#[async_trait]
impl ImageService for ImageProxy {
    async fn fetch_image(&self, prompt: &str) -> Option<ProxiedImage> {
        let url = primary_url(&self.primary_base_url, prompt);
        tracing::debug!("Trying primary image: {}", url);

        match self.download(&url).await {
            Ok(bytes) => return Some(ProxiedImage::new(bytes, ImageTier::Primary)),
            Err(e) => tracing::warn!("Primary image failed ({}). Switching to backup.", e),
        }

        let url = secondary_url(
            &self.secondary_base_url,
            fallback_keyword(prompt),
            cache_buster(),
        );
        tracing::debug!("Fetching backup image: {}", url);

        match self.download(&url).await {
            Ok(bytes) => Some(ProxiedImage::new(bytes, ImageTier::Secondary)),
            Err(e) => {
                tracing::error!("Backup image failed too: {}", e);
                None
            }
        }
    }
}
