use reqwest::Client;
use serde_json::json;

use crate::{
    error::{GeneratorError, Result},
    models::{
        ImageGenerationRequest, ImageGenerationResponse, ImagesApiResponse, ModelInfo,
        ResponseFormat,
    },
};

pub const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_base: String,
    api_key: String,
    organization: Option<String>,
}

impl ImageClient {
    pub fn new(
        client: Client,
        api_base: String,
        api_key: String,
        organization: Option<String>,
    ) -> Self {
        Self {
            client,
            api_base,
            api_key,
            organization,
        }
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let model_id = request.model_id.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL);
        let payload = build_payload(&request, model_id);

        log::info!("Generating image with model: {}", model_id);
        log::debug!("Image generation request payload: {}", payload);

        let url = format!("{}/images/generations", self.api_base);
        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload);
        if let Some(organization) = &self.organization {
            builder = builder.header("OpenAI-Organization", organization);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GeneratorError::ApiError(format!("Provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Provider returned {}: {}", status, error_text);
            return Err(GeneratorError::ApiError(format!(
                "Provider returned {}: {}",
                status, error_text
            )));
        }

        let api_response: ImagesApiResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::ResponseError(e.to_string()))?;

        if api_response.data.is_empty() {
            return Err(GeneratorError::ResponseError("No images generated".into()));
        }

        Ok(ImageGenerationResponse {
            data: api_response.data,
            model: model_id.to_string(),
        })
    }

    pub fn supported_models() -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "dall-e-2".to_string(),
                name: "DALL-E 2".to_string(),
                provider: "OpenAI".to_string(),
                max_images: 10,
                description: "General-purpose image generation, 256 to 1024 square".to_string(),
            },
            ModelInfo {
                id: "dall-e-3".to_string(),
                name: "DALL-E 3".to_string(),
                provider: "OpenAI".to_string(),
                max_images: 1,
                description: "Higher fidelity, square and wide formats, revises prompts"
                    .to_string(),
            },
            ModelInfo {
                id: "gpt-image-1".to_string(),
                name: "GPT Image 1".to_string(),
                provider: "OpenAI".to_string(),
                max_images: 10,
                description: "Natively multimodal image model".to_string(),
            },
        ]
    }
}

fn build_payload(request: &ImageGenerationRequest, model_id: &str) -> serde_json::Value {
    json!({
        "model": model_id,
        "prompt": request.prompt,
        "n": request.num_images.unwrap_or(1),
        "size": request.size.unwrap_or_default().as_str(),
        "response_format": request
            .response_format
            .unwrap_or(ResponseFormat::Url)
            .as_str(),
    })
}
