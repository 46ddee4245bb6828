//! Persistent storage for the Site24x7 OAuth token.
//!
//! A single JSON document `{token, saved_at}` lives at a fixed path in the
//! user's home directory. There is no locking; the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::configuration::Configuration;
use crate::error_utils;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("IO error on {path:?}: {cause}")]
    IoError {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// The persisted credential document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub token: String,
    pub saved_at: DateTime<Utc>,
}

/// Lenient view of the file used when reading: only the token matters and
/// files written by earlier tools store it as `oauth_token`.
#[derive(Debug, Deserialize)]
struct StoredCredentials {
    #[serde(alias = "oauth_token")]
    token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    file_path: PathBuf,
}

impl CredentialStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(configuration.credentials_path())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Write the token with the current timestamp, replacing any existing file
    pub fn save(&self, token: &str) -> Result<CredentialRecord, CredentialsError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|cause| self.io_error(cause))?;
        }

        let record = CredentialRecord {
            token: token.to_string(),
            saved_at: Utc::now(),
        };

        let content = serde_json::to_string_pretty(&record)?;
        fs::write(&self.file_path, content).map_err(|cause| self.io_error(cause))?;
        restrict_permissions(&self.file_path);

        debug!("Credentials saved to {}", self.file_path.display());
        Ok(record)
    }

    /// Read the saved token.
    ///
    /// A missing file yields `None`. So does a file that is not valid JSON or
    /// has no token, after a warning is reported.
    pub fn load(&self) -> Result<Option<String>, CredentialsError> {
        trace!("Loading credentials from {}...", self.file_path.display());

        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(cause) => return Err(self.io_error(cause)),
        };

        match serde_json::from_str::<StoredCredentials>(&content) {
            Ok(StoredCredentials { token: Some(token) }) if !token.is_empty() => Ok(Some(token)),
            Ok(_) => {
                error_utils::report_warning(&format!(
                    "Error loading credentials: no token in {}",
                    self.file_path.display()
                ));
                Ok(None)
            }
            Err(e) => {
                error_utils::report_warning(&format!("Error loading credentials: {}", e));
                Ok(None)
            }
        }
    }

    /// Delete the credentials file. Returns `false` when there was nothing to delete.
    pub fn clear(&self) -> Result<bool, CredentialsError> {
        match fs::remove_file(&self.file_path) {
            Ok(()) => {
                debug!("Credentials removed from {}", self.file_path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(cause) => Err(self.io_error(cause)),
        }
    }

    fn io_error(&self, cause: std::io::Error) -> CredentialsError {
        CredentialsError::IoError {
            path: self.file_path.clone(),
            cause,
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        warn!("Could not restrict permissions on {}: {}", path.display(), e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
