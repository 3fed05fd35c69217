use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::{GeneratorError, Result},
    generator::MediaFetch,
};

/// Plain HTTP GET client for retrieving generated images from provider URLs.
#[derive(Clone)]
pub struct HttpFetchClient {
    client: Client,
}

impl HttpFetchClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaFetch for HttpFetchClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GeneratorError::DownloadError(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::DownloadError(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GeneratorError::DownloadError(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
