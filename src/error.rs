//! Error types for the edit probe.

use std::fmt;
use std::time::Duration;

/// Body of a non-success API response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The body was not JSON; raw text.
    Text(String),
}

impl ErrorBody {
    /// Parses a response body, falling back to raw text.
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text.to_string()),
        }
    }

    /// Returns the most useful human-readable message in the body.
    ///
    /// For the OpenAI envelope `{"error": {"message": ...}}` this is the inner
    /// message, otherwise the whole body.
    pub fn message(&self) -> String {
        match self {
            Self::Json(value) => value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| value.to_string()),
            Self::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Errors that can occur while running the probe.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The credential variable is unset or empty.
    #[error("{0} not found in environment variables")]
    MissingCredential(String),

    /// API returned a non-success status.
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Parsed response body.
        body: ErrorBody,
    },

    /// Request exceeded its bounded wait.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid request parameters (e.g. an unparseable content type).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A success response whose body is not JSON.
    #[error("failed to decode response as JSON")]
    InvalidJson {
        /// Raw response text.
        text: String,
    },

    /// The response JSON has no usable `data` list.
    #[error("response JSON does not contain expected 'data' list")]
    MissingData,

    /// `data[0]` has neither `b64_json` nor `url`.
    #[error("response JSON does not contain 'b64_json' or 'url' in data[0]")]
    MissingImageData,

    /// The API returned a hosted URL instead of inline image data.
    #[error("received URL instead of b64_json: {0}")]
    UrlResponse(String),

    /// The response JSON has an unexpected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Maps a reqwest error, separating timeouts from other transport failures.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Network(err)
        }
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
