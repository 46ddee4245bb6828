use thiserror::Error;

use crate::{
    client::ApiError, configuration::ConfigurationError, credentials::CredentialsError,
    exit_codes::CliExitCode, format::FormattingError, param_utils::ParameterError,
};

/// Hint printed after errors caused by a missing or rejected token
pub const RECONFIGURE_HINT: &str = "Run \"site24x7 auth configure\" to update your credentials.";

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Invalid user input detected before any request is sent
    #[error("{0}")]
    Validation(String),
    /// Missing or unusable OAuth token
    #[error("{0}")]
    Authentication(String),
    /// Error returned by the remote API or the transport
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    /// Error related to configuration loading
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Error related to the credentials file
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),
    /// Error while building the request payload
    #[error("{0}")]
    Parameters(#[from] ParameterError),
    /// List query that cannot be encoded into the URL
    #[error("Query encoding error: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    Formatting(#[from] FormattingError),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// The user declined a confirmation prompt
    #[error("Aborted!")]
    Aborted,
    /// Interactive prompt failure
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::Validation(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> CliExitCode {
        CliExitCode::Failure
    }

    /// Follow-up advice printed under the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Authentication(_) => Some(RECONFIGURE_HINT),
            CliError::Api(e) if e.is_unauthorized() => Some(RECONFIGURE_HINT),
            _ => None,
        }
    }
}
