use crate::format::{FormattingError, OutputFormat};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_DIRECTORY: &str = ".site24x7";
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "credentials.json";
pub const DEFAULT_BASE_URL: &str = "https://www.site24x7.com/api";

pub const ENV_OAUTH_TOKEN: &str = "SITE24X7_OAUTH_TOKEN";
pub const ENV_BASE_URL: &str = "SITE24X7_BASE_URL";
pub const ENV_OUTPUT_FORMAT: &str = "SITE24X7_OUTPUT_FORMAT";
pub const ENV_CONFIG_DIR: &str = "SITE24X7_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the home directory")]
    FailedToFindHomeDirectory,
    #[error("failed to read settings file {path:?}, because of: {cause}")]
    FailedToReadSettings {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("failed to parse settings file {path:?}, because of: {cause}")]
    FailedToParseSettings {
        path: PathBuf,
        cause: serde_yaml::Error,
    },
    #[error("invalid base URL {url:?}: {cause}")]
    InvalidBaseUrl { url: String, cause: url::ParseError },
    #[error("{cause}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

/// Optional YAML settings file passed with the global `--config` option.
///
/// Only presentation settings live here; request construction is driven by
/// the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl SettingsFile {
    pub fn load_from_file(path: &Path) -> Result<SettingsFile, ConfigurationError> {
        debug!("Loading settings from {}...", path.display());
        let content =
            fs::read_to_string(path).map_err(|cause| ConfigurationError::FailedToReadSettings {
                path: path.to_path_buf(),
                cause,
            })?;

        if content.trim().is_empty() {
            return Ok(SettingsFile::default());
        }

        serde_yaml::from_str(&content).map_err(|cause| ConfigurationError::FailedToParseSettings {
            path: path.to_path_buf(),
            cause,
        })
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    base_url: String,
    output_format: OutputFormat,
    config_dir: PathBuf,
}

impl Configuration {
    /// Build a configuration from explicit values.
    ///
    /// The base URL is validated and stored without a trailing slash so that
    /// endpoint paths can be appended verbatim.
    pub fn new(
        base_url: &str,
        output_format: OutputFormat,
        config_dir: PathBuf,
    ) -> Result<Configuration, ConfigurationError> {
        Url::parse(base_url).map_err(|cause| ConfigurationError::InvalidBaseUrl {
            url: base_url.to_string(),
            cause,
        })?;

        Ok(Configuration {
            base_url: base_url.trim_end_matches('/').to_string(),
            output_format,
            config_dir,
        })
    }

    /// Load the configuration from the environment and an optional settings file
    pub fn load(settings_path: Option<&Path>) -> Result<Configuration, ConfigurationError> {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|value| !value.trim().is_empty());
        let config_dir = std::env::var(ENV_CONFIG_DIR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self::from_sources(base_url.as_deref(), config_dir, settings_path)
    }

    pub fn from_sources(
        base_url: Option<&str>,
        config_dir: Option<PathBuf>,
        settings_path: Option<&Path>,
    ) -> Result<Configuration, ConfigurationError> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => Self::get_default_configuration_directory()?,
        };

        let settings = match settings_path {
            Some(path) => SettingsFile::load_from_file(path)?,
            None => SettingsFile::default(),
        };

        let output_format = match settings.output {
            Some(name) => OutputFormat::from_name(&name)?,
            None => OutputFormat::default(),
        };

        Self::new(
            base_url.unwrap_or(DEFAULT_BASE_URL),
            output_format,
            config_dir,
        )
    }

    pub fn get_default_configuration_directory() -> Result<PathBuf, ConfigurationError> {
        match home_dir() {
            Some(home) => Ok(home.join(DEFAULT_APPLICATION_DIRECTORY)),
            None => Err(ConfigurationError::FailedToFindHomeDirectory),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default output format when none is given on the command line
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join(DEFAULT_CREDENTIALS_FILE_NAME)
    }
}
