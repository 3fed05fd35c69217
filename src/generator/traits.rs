use crate::{
    error::Result,
    models::{ImageGenerationRequest, ImageGenerationResponse},
};
use async_trait::async_trait;

/// Remote image generation call. Implemented by the OpenAI client and by
/// test fakes.
#[async_trait]
pub trait ImageGeneration: Send + Sync {
    async fn generate(&self, request: ImageGenerationRequest) -> Result<ImageGenerationResponse>;
}

/// Raw byte retrieval for a generated image URL.
#[async_trait]
pub trait MediaFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
