use std::env;

use crate::models::ImageSize;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub organization: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            api_base: None,
            organization: None,
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok();
        let api_base = env::var("OPENAI_API_BASE").ok();
        let organization = env::var("OPENAI_ORGANIZATION").ok();

        OpenAiConfig {
            api_key,
            api_base,
            organization,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub openai: OpenAiConfig,
    pub output_dir: String,
    pub image_size: ImageSize,
    pub model_id: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            openai: OpenAiConfig::default(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            image_size: ImageSize::default(),
            model_id: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let output_dir =
            env::var("RIMAGEN_OUTPUT_DIR").unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());
        let image_size = env::var("RIMAGEN_IMAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let model_id = env::var("RIMAGEN_MODEL").ok();

        GeneratorConfig {
            openai: OpenAiConfig::from_env(),
            output_dir,
            image_size,
            model_id,
        }
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_image_size(mut self, image_size: ImageSize) -> Self {
        self.image_size = image_size;
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }
}
