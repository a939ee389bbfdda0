//! End-to-end probe: credential, fetch, edit.

use crate::config::ProbeConfig;
use crate::credential::CredentialLoader;
use crate::error::Result;
use crate::image::{EditedImage, ImageFetcher, OpenAiEditor};

/// Runs the three probe steps in order, stopping at the first failure.
#[derive(Debug, Clone)]
pub struct Probe {
    config: ProbeConfig,
    loader: CredentialLoader,
    client: reqwest::Client,
}

impl Probe {
    /// Creates a probe that loads its credential per `config`.
    pub fn new(config: ProbeConfig) -> Self {
        let loader = CredentialLoader::new(&config.env_var, &config.dotenv_file);
        Self {
            config,
            loader,
            client: reqwest::Client::new(),
        }
    }

    /// Replaces the credential loader (e.g. to change the dotenv search path).
    pub fn with_loader(mut self, loader: CredentialLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Runs the probe and returns the saved image.
    ///
    /// No request is made if the credential is missing, and the edit is never
    /// submitted if the fetch fails.
    pub async fn try_run(&self) -> Result<EditedImage> {
        let credential = self.loader.load()?;

        let image = ImageFetcher::new(self.client.clone(), self.config.fetch_timeout)
            .fetch(&self.config.image_url)
            .await?;

        OpenAiEditor::builder(credential)
            .client(self.client.clone())
            .endpoint(self.config.edits_url())
            .model(&self.config.model)
            .size(&self.config.size)
            .n(self.config.n)
            .timeout(self.config.edit_timeout)
            .build()
            .edit(&image, &self.config.prompt, &self.config.output)
            .await
    }

    /// Runs the probe, logging any failure. Returns true on success.
    pub async fn run(&self) -> bool {
        tracing::info!("--- starting OpenAI edit API probe ---");
        let ok = match self.try_run().await {
            Ok(image) => {
                tracing::info!(
                    path = %image.path.display(),
                    size_bytes = image.size(),
                    format = image.format.extension(),
                    "image saved successfully"
                );
                true
            }
            Err(e) => {
                tracing::error!(status = e.status(), "probe failed: {e}");
                false
            }
        };
        tracing::info!("--- probe finished ---");
        ok
    }
}
