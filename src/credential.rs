//! API key loading from the environment and `.env.local`.

use crate::error::{ProbeError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Secret bearer token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First five characters, for log lines.
    pub fn prefix(&self) -> &str {
        match self.0.char_indices().nth(5) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({}...)", self.prefix())
    }
}

/// Loads the credential, optionally sourcing a dotenv file first.
#[derive(Debug, Clone)]
pub struct CredentialLoader {
    env_var: String,
    candidates: Vec<PathBuf>,
}

impl CredentialLoader {
    /// Creates a loader that looks for `dotenv_file` next to the running
    /// executable, then in the current working directory.
    pub fn new(env_var: impl Into<String>, dotenv_file: &str) -> Self {
        let mut candidates = Vec::with_capacity(2);
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(dotenv_file));
        }
        candidates.push(PathBuf::from(dotenv_file));

        Self {
            env_var: env_var.into(),
            candidates,
        }
    }

    /// Replaces the dotenv search path.
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Returns the first candidate dotenv file that exists.
    pub fn dotenv_path(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }

    /// Loads the dotenv file (overriding existing variables), then reads the
    /// credential variable. Unset and empty are both treated as missing.
    pub fn load(&self) -> Result<Credential> {
        tracing::info!("loading environment variables");
        match self.dotenv_path() {
            Some(path) => match dotenvy::from_path_override(path) {
                Ok(()) => tracing::info!(path = %path.display(), "dotenv file loaded"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "failed to parse dotenv file: {e}")
                }
            },
            None => tracing::warn!(
                "dotenv file not found next to the executable or in the working directory"
            ),
        }

        let key = std::env::var(&self.env_var)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProbeError::MissingCredential(self.env_var.clone()))?;

        let credential = Credential::new(key);
        tracing::info!(
            env_var = %self.env_var,
            "API key loaded (starts with: {}...)",
            credential.prefix()
        );
        Ok(credential)
    }
}

/// Serializes unit tests that touch the process environment, including
/// those that build a `reqwest::Client` (it reads proxy variables).
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|e| e.into_inner())
}
