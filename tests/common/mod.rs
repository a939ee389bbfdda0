//! Shared fixtures for the WireMock-backed probe tests.

#![allow(dead_code)]

use editprobe::{CredentialLoader, Probe, ProbeConfig, ProbeConfigBuilder};
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};
use wiremock::MockServer;

pub const TEST_KEY: &str = "sk-test-key";
pub const IMAGE_PATH: &str = "/sample.png";
pub const EDITS_PATH: &str = "/images/edits";

/// A minimal PNG header followed by padding.
pub const PNG_BYTES: [u8; 16] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Held for the whole test: loading a dotenv file sets process variables,
/// which must not race with `reqwest::Client` reading proxy variables.
pub async fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(())).lock().await
}

/// Mock server plus a scratch directory holding the dotenv file and output.
pub struct TestEnv {
    pub server: MockServer,
    pub dir: TempDir,
    pub env_var: String,
}

impl TestEnv {
    /// Starts a server and writes `<env_var>=sk-test-key` to a dotenv file.
    ///
    /// Each test passes its own variable name so tests never share process
    /// environment state.
    pub async fn with_key(env_var: &str) -> Self {
        let env = Self::without_key(env_var).await;
        std::fs::write(env.dotenv_path(), format!("{env_var}={TEST_KEY}\n")).unwrap();
        env
    }

    /// Starts a server with no dotenv file and the variable unset.
    pub async fn without_key(env_var: &str) -> Self {
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
            env_var: env_var.to_string(),
        }
    }

    pub fn dotenv_path(&self) -> PathBuf {
        self.dir.path().join(".env.local")
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join("test_output.png")
    }

    pub fn config_builder(&self) -> ProbeConfigBuilder {
        ProbeConfig::builder()
            .image_url(format!("{}{}", self.server.uri(), IMAGE_PATH))
            .base_url(self.server.uri())
            .output(self.output_path())
            .env_var(&self.env_var)
    }

    pub fn probe_with(&self, config: ProbeConfig) -> Probe {
        let loader = CredentialLoader::new(&self.env_var, ".env.local")
            .with_candidates(vec![self.dotenv_path()]);
        Probe::new(config).with_loader(loader)
    }

    pub fn probe(&self) -> Probe {
        self.probe_with(self.config_builder().build())
    }
}
