pub mod config;
pub mod download;
pub mod error;
pub mod generator;
pub mod logger;
pub mod models;
pub mod openai;

pub use config::{GeneratorConfig, OpenAiConfig};
pub use download::HttpFetchClient;
pub use error::{GeneratorError, Result};
pub use generator::{ImageGeneration, ImageGenerator, MediaFetch};
pub use models::*;
pub use openai::{ImageClient, OpenAiClient};
