pub mod image_client;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::{OpenAiConfig, DEFAULT_API_BASE},
    error::{GeneratorError, Result},
    generator::ImageGeneration,
    models::{ImageGenerationRequest, ImageGenerationResponse},
};

pub use image_client::ImageClient;

#[derive(Clone)]
pub struct OpenAiClient {
    image_client: ImageClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .ok_or_else(|| GeneratorError::ConfigError("OpenAI API key is required".into()))?;

        let api_base = config
            .api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = api_base.trim_end_matches('/').to_string();

        Ok(Self {
            image_client: ImageClient::new(Client::new(), api_base, api_key, config.organization),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl ImageGeneration for OpenAiClient {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse> {
        self.image_client.generate(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        assert!(OpenAiClient::new(OpenAiConfig::new()).is_err());
    }

    #[test]
    fn test_builds_with_key() {
        let config = OpenAiConfig::new()
            .with_api_key("sk-test")
            .with_api_base("https://proxy.example/v1/");
        assert!(OpenAiClient::new(config).is_ok());
    }
}
