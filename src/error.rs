use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Image generation request failed: {0}")]
    ApiError(String),
    #[error("Unexpected provider response: {0}")]
    ResponseError(String),
    #[error("Image download failed: {0}")]
    DownloadError(String),
    #[error("Failed to write image file: {0}")]
    FileWriteError(String),
    #[error("Failed to create output directory: {0}")]
    DirectoryError(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
