//! Probe configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Small public PNG used as the edit input.
pub const DEFAULT_IMAGE_URL: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/4/47/PNG_transparency_demonstration_1.png/280px-PNG_transparency_demonstration_1.png";
/// Edit instruction sent with the image.
pub const DEFAULT_PROMPT: &str = "Add a small red cartoon heart floating above the main object.";
/// Where the decoded result is written.
pub const DEFAULT_OUTPUT: &str = "test_output.png";
/// OpenAI API base; the edits endpoint is `<base>/images/edits`.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Model identifier sent in the `model` field.
pub const DEFAULT_MODEL: &str = "gpt-image-1";
/// Target size sent in the `size` field.
pub const DEFAULT_SIZE: &str = "1024x1024";
/// Environment variable holding the API key.
pub const DEFAULT_ENV_VAR: &str = "OPENAI_API_KEY";
/// Dotenv file searched next to the executable and in the working directory.
pub const DEFAULT_DOTENV_FILE: &str = ".env.local";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const EDIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for one probe run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// URL of the input image.
    pub image_url: String,
    /// Edit instruction.
    pub prompt: String,
    /// Output file, overwritten on success.
    pub output: PathBuf,
    /// API base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Requested output size, e.g. "1024x1024".
    pub size: String,
    /// Number of images requested.
    pub n: u32,
    /// Environment variable holding the API key.
    pub env_var: String,
    /// Dotenv file name searched before reading the variable.
    pub dotenv_file: String,
    /// Bounded wait for the image download.
    pub fetch_timeout: Duration,
    /// Bounded wait for the edit request.
    pub edit_timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            image_url: DEFAULT_IMAGE_URL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            size: DEFAULT_SIZE.to_string(),
            n: 1,
            env_var: DEFAULT_ENV_VAR.to_string(),
            dotenv_file: DEFAULT_DOTENV_FILE.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            edit_timeout: EDIT_TIMEOUT,
        }
    }
}

impl ProbeConfig {
    /// Creates a new `ProbeConfigBuilder`.
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder::new()
    }

    /// Full URL of the edits endpoint.
    pub fn edits_url(&self) -> String {
        format!("{}/images/edits", self.base_url.trim_end_matches('/'))
    }
}

/// Builder for ProbeConfig.
#[derive(Debug, Clone, Default)]
pub struct ProbeConfigBuilder {
    config: ProbeConfig,
}

impl ProbeConfigBuilder {
    /// Creates a new builder with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the URL of the input image.
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.config.image_url = url.into();
        self
    }

    /// Sets the edit prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    /// Sets the output file path.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    /// Sets the API base URL (useful for pointing at a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Sets the output size, e.g. "1024x1024".
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.config.size = size.into();
        self
    }

    /// Sets the name of the credential environment variable.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.config.env_var = name.into();
        self
    }

    /// Sets the dotenv file name searched for the credential.
    pub fn dotenv_file(mut self, name: impl Into<String>) -> Self {
        self.config.dotenv_file = name.into();
        self
    }

    /// Sets the bounded wait for the image download.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }

    /// Sets the bounded wait for the edit request.
    pub fn edit_timeout(mut self, timeout: Duration) -> Self {
        self.config.edit_timeout = timeout;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ProbeConfig {
        self.config
    }
}
