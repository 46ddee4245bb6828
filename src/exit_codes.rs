//! Exit codes for the Site24x7 CLI
//!
//! Zero when the command completed, one for anything else.

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Failure (1) - Validation, API, authentication or I/O error, or an aborted confirmation
    Failure = 1,
}

impl CliExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(CliExitCode::Success.code(), 0);
        assert_eq!(i32::from(CliExitCode::Failure), 1);
    }
}
