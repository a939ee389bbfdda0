//! OpenAI image edits client (gpt-image-1).

use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SIZE};
use crate::credential::Credential;
use crate::error::{ErrorBody, ProbeError, Result};
use crate::image::types::{self, EditedImage, FetchedImage, ImageFormat};
use base64::Engine;
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// Characters of a success body shown in the log.
const LOG_PREVIEW_CHARS: usize = 500;

/// Builder for OpenAiEditor.
#[derive(Debug, Clone)]
pub struct OpenAiEditorBuilder {
    credential: Credential,
    client: Option<reqwest::Client>,
    endpoint: String,
    model: String,
    size: String,
    n: u32,
    timeout: Duration,
}

impl OpenAiEditorBuilder {
    /// Creates a new builder with default settings.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            client: None,
            endpoint: format!("{DEFAULT_BASE_URL}/images/edits"),
            model: DEFAULT_MODEL.to_string(),
            size: DEFAULT_SIZE.to_string(),
            n: 1,
            timeout: Duration::from_secs(120),
        }
    }

    /// Reuses an existing HTTP client.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the full edits endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Sets the model identifier sent in the `model` field.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the size, e.g. "1024x1024".
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Sets the number of images requested.
    pub fn n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    /// Sets the bounded wait for the edit request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the editor, creating a client if none was supplied.
    pub fn build(self) -> OpenAiEditor {
        OpenAiEditor {
            client: self.client.unwrap_or_default(),
            credential: self.credential,
            endpoint: self.endpoint,
            model: self.model,
            size: self.size,
            n: self.n,
            timeout: self.timeout,
        }
    }
}

/// Submits one image edit and saves the inline result.
#[derive(Debug)]
pub struct OpenAiEditor {
    client: reqwest::Client,
    credential: Credential,
    endpoint: String,
    model: String,
    size: String,
    n: u32,
    timeout: Duration,
}

impl OpenAiEditor {
    /// Creates a new `OpenAiEditorBuilder`.
    pub fn builder(credential: Credential) -> OpenAiEditorBuilder {
        OpenAiEditorBuilder::new(credential)
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn form(&self, image: &FetchedImage, prompt: &str) -> Result<reqwest::multipart::Form> {
        let image_part = reqwest::multipart::Part::bytes(image.data.clone())
            .file_name(image.file_name())
            .mime_str(&image.content_type)
            .map_err(|e| ProbeError::InvalidRequest(e.to_string()))?;

        Ok(reqwest::multipart::Form::new()
            .part("image", image_part)
            .text("prompt", prompt.to_string())
            .text("model", self.model.clone())
            .text("n", self.n.to_string())
            .text("size", self.size.clone()))
    }

    /// Sends `image` with `prompt` to the edits endpoint and writes the
    /// decoded result to `output`. No file is touched unless the response
    /// carries inline base64 data that decodes cleanly.
    pub async fn edit(
        &self,
        image: &FetchedImage,
        prompt: &str,
        output: &Path,
    ) -> Result<EditedImage> {
        tracing::info!(endpoint = %self.endpoint, model = %self.model, prompt, "preparing edit request");
        let form = self.form(image, prompt)?;

        let start = Instant::now();
        tracing::info!("sending request to OpenAI");
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, self.credential.bearer())
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProbeError::from_transport(e, self.timeout))?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            status = status.as_u16(),
            "received response in {:.2} seconds",
            duration_ms as f64 / 1000.0
        );

        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let body = ErrorBody::parse(&text);
            match &body {
                ErrorBody::Json(value) => tracing::info!("error response JSON: {value}"),
                ErrorBody::Text(raw) => tracing::info!("error response text: {raw}"),
            }
            return Err(ProbeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| ProbeError::from_transport(e, self.timeout))?;
        let data = decode_success_body(&text)?;
        tracing::info!(path = %output.display(), "saving decoded image");
        types::save(output, &data)?;

        let format = ImageFormat::from_magic_bytes(&data).unwrap_or_default();
        Ok(EditedImage {
            data,
            format,
            path: output.to_path_buf(),
            model: self.model.clone(),
            duration_ms,
        })
    }
}

/// Extracts and decodes `data[0].b64_json` from a 200 response body.
pub(crate) fn decode_success_body(text: &str) -> Result<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|_| {
        tracing::info!("response text: {text}");
        ProbeError::InvalidJson {
            text: text.to_string(),
        }
    })?;
    let preview: String = value.to_string().chars().take(LOG_PREVIEW_CHARS).collect();
    tracing::info!("response JSON (partial): {preview}");

    let response: EditResponse = serde_json::from_value(value.clone())
        .map_err(|e| ProbeError::UnexpectedResponse(e.to_string()))?;

    let Some(first) = response.data.and_then(|d| d.into_iter().next()) else {
        tracing::info!("full response JSON: {value}");
        return Err(ProbeError::MissingData);
    };

    if let Some(b64) = first.b64_json {
        tracing::info!("found b64_json image data, decoding");
        // Line wrapping inside the payload is ignored.
        let b64: String = b64.split_ascii_whitespace().collect();
        return base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| ProbeError::Decode(e.to_string()));
    }

    if let Some(url) = first.url {
        tracing::warn!(url = %url, "received URL instead of b64_json; URL results are not saved");
        return Err(ProbeError::UrlResponse(url));
    }

    Err(ProbeError::MissingImageData)
}

#[derive(Debug, Deserialize)]
struct EditResponse {
    #[serde(default)]
    data: Option<Vec<EditData>>,
}

#[derive(Debug, Deserialize)]
struct EditData {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}
