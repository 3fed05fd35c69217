pub mod traits;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    config::GeneratorConfig,
    download::HttpFetchClient,
    error::{GeneratorError, Result},
    models::{ImageGenerationRequest, ImageSize},
    openai::OpenAiClient,
};

pub use traits::{ImageGeneration, MediaFetch};

/// Drives one end-to-end run: for each index, request an image from the
/// provider, download the returned URL, and save it under the output
/// directory as `image_<i>.png`.
pub struct ImageGenerator {
    generation: Arc<dyn ImageGeneration>,
    fetch: Arc<dyn MediaFetch>,
    output_dir: PathBuf,
    image_size: ImageSize,
    model_id: Option<String>,
}

impl ImageGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let client = OpenAiClient::new(config.openai.clone())?;
        Ok(Self::with_clients(
            config,
            Arc::new(client),
            Arc::new(HttpFetchClient::new()),
        ))
    }

    /// Build a generator around explicit collaborators. Tests substitute
    /// fakes here to run without network access.
    pub fn with_clients(
        config: GeneratorConfig,
        generation: Arc<dyn ImageGeneration>,
        fetch: Arc<dyn MediaFetch>,
    ) -> Self {
        Self {
            generation,
            fetch,
            output_dir: PathBuf::from(config.output_dir),
            image_size: config.image_size,
            model_id: config.model_id,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generate `count` images for `prompt`, strictly in order. The first
    /// failure aborts the rest of the run; files already written stay.
    pub async fn generate(&self, prompt: &str, count: u32) -> Result<()> {
        self.ensure_output_dir()?;

        for i in 1..=count {
            log::info!("Generating image {} of {}...", i, count);

            let request = ImageGenerationRequest {
                prompt: prompt.to_string(),
                model_id: self.model_id.clone(),
                size: Some(self.image_size),
                num_images: Some(1),
                response_format: None,
            };

            let response = self.generation.generate(request).await?;
            let url = response.first_url()?;
            let bytes = self.fetch.fetch(url).await?;

            let path = self.image_path(i);
            fs::write(&path, bytes)
                .map_err(|e| GeneratorError::FileWriteError(format!("{}: {}", path.display(), e)))?;

            log::info!("Image saved to: {}", path.display());
        }

        Ok(())
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            GeneratorError::DirectoryError(format!("{}: {}", self.output_dir.display(), e))
        })
    }

    fn image_path(&self, index: u32) -> PathBuf {
        self.output_dir.join(format!("image_{}.png", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneratedImage, ImageGenerationResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    type CallLog = Arc<Mutex<Vec<String>>>;

    /// Fake provider: hands out numbered URLs, optionally failing at a
    /// given call index.
    struct FakeGeneration {
        calls: CallLog,
        served: Mutex<u32>,
        fail_at: Option<u32>,
        omit_url: bool,
    }

    impl FakeGeneration {
        fn new(calls: CallLog) -> Self {
            Self {
                calls,
                served: Mutex::new(0),
                fail_at: None,
                omit_url: false,
            }
        }
    }

    #[async_trait]
    impl ImageGeneration for FakeGeneration {
        async fn generate(
            &self,
            request: ImageGenerationRequest,
        ) -> crate::Result<ImageGenerationResponse> {
            let mut served = self.served.lock().unwrap();
            *served += 1;
            let index = *served;
            self.calls.lock().unwrap().push(format!("generate {}", index));

            if self.fail_at == Some(index) {
                return Err(GeneratorError::ApiError("quota exceeded".into()));
            }

            let url = if self.omit_url {
                None
            } else {
                Some(format!("https://img.test/{}.png", index))
            };

            Ok(ImageGenerationResponse {
                data: vec![GeneratedImage {
                    url,
                    b64_json: None,
                    revised_prompt: Some(request.prompt),
                }],
                model: "fake".to_string(),
            })
        }
    }

    /// Fake fetcher: bytes are the URL itself, so each index saves
    /// distinguishable content.
    struct FakeFetch {
        calls: CallLog,
        tag: String,
    }

    #[async_trait]
    impl MediaFetch for FakeFetch {
        async fn fetch(&self, url: &str) -> crate::Result<Vec<u8>> {
            self.calls.lock().unwrap().push(format!("fetch {}", url));
            Ok(format!("{}{}", self.tag, url).into_bytes())
        }
    }

    fn generator_with(
        output_dir: &Path,
        generation: FakeGeneration,
        calls: CallLog,
        tag: &str,
    ) -> ImageGenerator {
        let config = GeneratorConfig::new().with_output_dir(output_dir.to_str().unwrap());
        ImageGenerator::with_clients(
            config,
            Arc::new(generation),
            Arc::new(FakeFetch {
                calls,
                tag: tag.to_string(),
            }),
        )
    }

    #[tokio::test]
    async fn test_saves_count_files_in_order() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");
        let calls: CallLog = Arc::default();
        let generator =
            generator_with(&out, FakeGeneration::new(calls.clone()), calls.clone(), "");

        generator.generate("a red barn", 3).await.unwrap();

        for i in 1..=3 {
            let contents = fs::read(out.join(format!("image_{}.png", i))).unwrap();
            assert_eq!(contents, format!("https://img.test/{}.png", i).into_bytes());
        }
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                "generate 1",
                "fetch https://img.test/1.png",
                "generate 2",
                "fetch https://img.test/2.png",
                "generate 3",
                "fetch https://img.test/3.png",
            ]
        );
    }

    #[tokio::test]
    async fn test_zero_count_creates_directory_only() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");
        let calls: CallLog = Arc::default();
        let generator =
            generator_with(&out, FakeGeneration::new(calls.clone()), calls.clone(), "");

        generator.generate("anything", 0).await.unwrap();

        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_iterations() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");
        let calls: CallLog = Arc::default();
        let mut generation = FakeGeneration::new(calls.clone());
        generation.fail_at = Some(2);
        let generator = generator_with(&out, generation, calls.clone(), "");

        let err = generator.generate("a red barn", 3).await.unwrap_err();
        assert!(matches!(err, GeneratorError::ApiError(_)));

        assert!(out.join("image_1.png").exists());
        assert!(!out.join("image_2.png").exists());
        assert!(!out.join("image_3.png").exists());
        // generation 3 never attempted
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["generate 1", "fetch https://img.test/1.png", "generate 2"]
        );
    }

    #[tokio::test]
    async fn test_missing_url_is_response_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");
        let calls: CallLog = Arc::default();
        let mut generation = FakeGeneration::new(calls.clone());
        generation.omit_url = true;
        let generator = generator_with(&out, generation, calls.clone(), "");

        let err = generator.generate("a red barn", 1).await.unwrap_err();
        assert!(matches!(err, GeneratorError::ResponseError(_)));
        assert!(!out.join("image_1.png").exists());
    }

    #[tokio::test]
    async fn test_unrelated_files_left_alone() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("notes.txt"), b"keep me").unwrap();

        let calls: CallLog = Arc::default();
        let generator =
            generator_with(&out, FakeGeneration::new(calls.clone()), calls.clone(), "");
        generator.generate("a red barn", 1).await.unwrap();

        assert_eq!(fs::read(out.join("notes.txt")).unwrap(), b"keep me");
        assert!(out.join("image_1.png").exists());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_previous_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("images");

        let calls: CallLog = Arc::default();
        let generator =
            generator_with(&out, FakeGeneration::new(calls.clone()), calls.clone(), "old ");
        generator.generate("a red barn", 2).await.unwrap();

        let calls: CallLog = Arc::default();
        let generator =
            generator_with(&out, FakeGeneration::new(calls.clone()), calls.clone(), "new ");
        generator.generate("a red barn", 2).await.unwrap();

        for i in 1..=2 {
            let contents = fs::read(out.join(format!("image_{}.png", i))).unwrap();
            assert_eq!(
                contents,
                format!("new https://img.test/{}.png", i).into_bytes()
            );
        }
    }
}
