#![warn(missing_docs)]
//! editprobe - exercise the OpenAI image edits endpoint end to end.
//!
//! Loads an API key (optionally from `.env.local`), downloads a sample image,
//! submits it with a prompt to `/v1/images/edits`, and writes the returned
//! base64 image to disk.
//!
//! # Quick Start
//!
//! ```no_run
//! use editprobe::{Probe, ProbeConfig};
//!
//! #[tokio::main]
//! async fn main() -> editprobe::Result<()> {
//!     let config = ProbeConfig::builder()
//!         .prompt("Add a small red cartoon heart floating above the main object.")
//!         .output("edited.png")
//!         .build();
//!     let image = Probe::new(config).try_run().await?;
//!     println!("saved {} bytes to {}", image.size(), image.path.display());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `editprobe` command-line binary

pub mod config;
pub mod credential;
mod error;
pub mod image;
mod probe;

// Re-export error types at crate root
pub use error::{ErrorBody, ProbeError, Result};

pub use config::{ProbeConfig, ProbeConfigBuilder};
pub use credential::{Credential, CredentialLoader};
pub use image::{EditedImage, FetchedImage, ImageFetcher, ImageFormat, OpenAiEditor};
pub use probe::Probe;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ProbeConfig;
    pub use crate::error::{ProbeError, Result};
    pub use crate::image::{EditedImage, FetchedImage, OpenAiEditor};
    pub use crate::probe::Probe;
}
