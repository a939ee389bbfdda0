//! Input image download.

use crate::error::{ErrorBody, ProbeError, Result};
use crate::image::types::{FetchedImage, DEFAULT_CONTENT_TYPE};
use std::time::Duration;

/// Downloads the image to be edited with a single bounded GET.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl ImageFetcher {
    /// Creates a fetcher that waits at most `timeout` per request.
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetches `url`. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        tracing::info!(url, "fetching test image");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProbeError::Api {
                status: status.as_u16(),
                body: ErrorBody::Text(text),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| ProbeError::from_transport(e, self.timeout))?
            .to_vec();

        let image = FetchedImage::new(data, content_type);
        tracing::info!(
            content_type = %image.content_type,
            "test image fetched successfully ({:.2} KB)",
            image.size_kb()
        );
        Ok(image)
    }
}
