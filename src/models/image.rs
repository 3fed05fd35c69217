use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::{
    error::{GeneratorError, Result},
    models::{ImageSize, ResponseFormat},
};

#[derive(Debug, Clone, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model_id: Option<String>,
    pub size: Option<ImageSize>,
    pub num_images: Option<u32>,
    pub response_format: Option<ResponseFormat>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        ImageGenerationRequest {
            prompt: prompt.into(),
            model_id: None,
            size: None,
            num_images: None,
            response_format: None,
        }
    }
}

/// One result from the provider, either a hosted URL or an inline payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

impl GeneratedImage {
    /// Decode the inline base64 payload, for `ResponseFormat::B64Json` results.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let encoded = self
            .b64_json
            .ok_or_else(|| GeneratorError::ResponseError("No inline image payload".into()))?;

        STANDARD
            .decode(encoded)
            .map_err(|e| GeneratorError::ResponseError(format!("Invalid base64 payload: {}", e)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationResponse {
    pub data: Vec<GeneratedImage>,
    pub model: String,
}

impl ImageGenerationResponse {
    /// URL of the first generated image.
    pub fn first_url(&self) -> Result<&str> {
        let first = self
            .data
            .first()
            .ok_or_else(|| GeneratorError::ResponseError("No images generated".into()))?;

        first
            .url
            .as_deref()
            .ok_or_else(|| GeneratorError::ResponseError("Result is missing a url field".into()))
    }
}

/// Wire shape of the provider's `/images/generations` response.
#[derive(Debug, Deserialize)]
pub struct ImagesApiResponse {
    pub created: Option<u64>,
    pub data: Vec<GeneratedImage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_image(url: &str) -> GeneratedImage {
        GeneratedImage {
            url: Some(url.to_string()),
            b64_json: None,
            revised_prompt: None,
        }
    }

    #[test]
    fn test_deserialize_url_response() {
        let body = r#"{
            "created": 1700000000,
            "data": [{"url": "https://images.example/a.png", "revised_prompt": "a cat"}]
        }"#;

        let response: ImagesApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.created, Some(1700000000));
        assert_eq!(
            response.data[0].url.as_deref(),
            Some("https://images.example/a.png")
        );
        assert_eq!(response.data[0].revised_prompt.as_deref(), Some("a cat"));
    }

    #[test]
    fn test_deserialize_b64_response_and_decode() {
        let body = r#"{"created": null, "data": [{"b64_json": "aGVsbG8="}]}"#;

        let response: ImagesApiResponse = serde_json::from_str(body).unwrap();
        let bytes = response.data.into_iter().next().unwrap().into_bytes().unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_first_url() {
        let response = ImageGenerationResponse {
            data: vec![url_image("https://images.example/1.png")],
            model: "dall-e-2".to_string(),
        };
        assert_eq!(response.first_url().unwrap(), "https://images.example/1.png");
    }

    #[test]
    fn test_first_url_empty_data() {
        let response = ImageGenerationResponse {
            data: vec![],
            model: "dall-e-2".to_string(),
        };
        assert!(response.first_url().is_err());
    }

    #[test]
    fn test_first_url_missing_field() {
        let response = ImageGenerationResponse {
            data: vec![GeneratedImage {
                url: None,
                b64_json: Some("aGVsbG8=".to_string()),
                revised_prompt: None,
            }],
            model: "dall-e-2".to_string(),
        };
        assert!(response.first_url().is_err());
    }

    #[test]
    fn test_into_bytes_rejects_bad_base64() {
        let image = GeneratedImage {
            url: None,
            b64_json: Some("not base64!!".to_string()),
            revised_prompt: None,
        };
        assert!(image.into_bytes().is_err());
    }
}
