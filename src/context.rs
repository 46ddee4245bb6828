//! Context builder for the Site24x7 CLI client.
//!
//! This module provides a centralized way to initialize the common execution
//! context that commands need: configuration, output format, credential
//! store and, on demand, the authenticated API client.

use std::path::PathBuf;

use clap::ArgMatches;
use tracing::debug;

use crate::{
    client::Site24x7Client,
    commands::params::{PARAMETER_OUTPUT, PARAMETER_SETTINGS, PARAMETER_TOKEN, PARAMETER_VERBOSE},
    configuration::{Configuration, ENV_OAUTH_TOKEN},
    credentials::CredentialStore,
    error::CliError,
    format::OutputFormat,
};

pub const MISSING_TOKEN_MESSAGE: &str = "No OAuth token provided.";

/// Execution context containing common resources needed by CLI commands.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    configuration: Configuration,
    output_format: OutputFormat,
    verbose: bool,
    token_flag: Option<String>,
    env_token: Option<String>,
}

impl ExecutionContext {
    /// Create a new execution context from the root command-line arguments.
    ///
    /// The token itself is resolved lazily so that commands which do not
    /// talk to the API never touch the credentials file.
    pub fn from_args(matches: &ArgMatches) -> Result<Self, CliError> {
        let settings = matches.get_one::<PathBuf>(PARAMETER_SETTINGS);
        let configuration = Configuration::load(settings.map(PathBuf::as_path))?;

        let output_format = match matches.get_one::<String>(PARAMETER_OUTPUT) {
            Some(name) => OutputFormat::from_name(name)?,
            None => configuration.output_format(),
        };

        let env_token = std::env::var(ENV_OAUTH_TOKEN)
            .ok()
            .filter(|token| !token.is_empty());

        Ok(Self::new(
            configuration,
            output_format,
            matches.get_flag(PARAMETER_VERBOSE),
            matches.get_one::<String>(PARAMETER_TOKEN).cloned(),
            env_token,
        ))
    }

    pub fn new(
        configuration: Configuration,
        output_format: OutputFormat,
        verbose: bool,
        token_flag: Option<String>,
        env_token: Option<String>,
    ) -> Self {
        ExecutionContext {
            configuration,
            output_format,
            verbose,
            token_flag,
            env_token,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::from_configuration(&self.configuration)
    }

    /// Resolve the OAuth token: `--token`, then the saved credentials, then the environment
    pub fn resolve_token(&self) -> Result<Option<String>, CliError> {
        if let Some(token) = &self.token_flag {
            debug!("Using token from the command line");
            return Ok(Some(token.clone()));
        }

        if let Some(token) = self.credential_store().load()? {
            debug!("Using saved token");
            return Ok(Some(token));
        }

        if let Some(token) = &self.env_token {
            debug!("Using token from {}", ENV_OAUTH_TOKEN);
            return Ok(Some(token.clone()));
        }

        Ok(None)
    }

    /// Build an API client carrying the resolved token
    pub fn authenticated_client(&self) -> Result<Site24x7Client, CliError> {
        match self.resolve_token()? {
            Some(token) => Ok(Site24x7Client::new(
                self.configuration.base_url(),
                Some(&token),
            )?),
            None => Err(CliError::Authentication(MISSING_TOKEN_MESSAGE.to_string())),
        }
    }

    /// Build an API client carrying `token` regardless of what is saved
    pub fn client_with_token(&self, token: &str) -> Result<Site24x7Client, CliError> {
        Ok(Site24x7Client::new(
            self.configuration.base_url(),
            Some(token),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(dir: &tempfile::TempDir, flag: Option<&str>, env: Option<&str>) -> ExecutionContext {
        let configuration = Configuration::new(
            "http://127.0.0.1:1",
            OutputFormat::Table,
            dir.path().to_path_buf(),
        )
        .unwrap();
        ExecutionContext::new(
            configuration,
            OutputFormat::Json,
            false,
            flag.map(str::to_string),
            env.map(str::to_string),
        )
    }

    #[test]
    fn test_flag_wins_over_saved_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, Some("flag-token"), Some("env-token"));
        ctx.credential_store().save("saved-token").unwrap();

        assert_eq!(ctx.resolve_token().unwrap().as_deref(), Some("flag-token"));
    }

    #[test]
    fn test_saved_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, None, Some("env-token"));
        ctx.credential_store().save("saved-token").unwrap();

        assert_eq!(ctx.resolve_token().unwrap().as_deref(), Some("saved-token"));
    }

    #[test]
    fn test_env_is_last_resort() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, None, Some("env-token"));

        assert_eq!(ctx.resolve_token().unwrap().as_deref(), Some("env-token"));
    }

    #[test]
    fn test_missing_token_is_authentication_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, None, None);

        match ctx.authenticated_client() {
            Err(CliError::Authentication(message)) => assert_eq!(message, MISSING_TOKEN_MESSAGE),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
