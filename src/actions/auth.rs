//! Authentication actions: saving, clearing and checking the OAuth token.

use std::io::Write;

use color_print::cformat;
use tracing::{debug, trace};

use crate::{
    client::{Site24x7Client, CURRENT_STATUS_PATH},
    context::ExecutionContext,
    error::CliError,
    error_utils,
};

/// Shortest token accepted by `auth configure`
pub const MIN_TOKEN_LENGTH: usize = 20;

/// Number of trailing token characters shown by `auth status`
pub const VISIBLE_TOKEN_SUFFIX: usize = 8;

/// Validate a token against the API and save it.
///
/// The token is saved even when the test call fails, with a warning.
pub async fn configure(
    ctx: &ExecutionContext,
    token: Option<&str>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let token = match token {
        Some(token) => token.trim().to_string(),
        None => inquire::Password::new("OAuth token:")
            .without_confirmation()
            .with_help_message("Generate one in the Site24x7 API console")
            .prompt()?
            .trim()
            .to_string(),
    };

    if token.chars().count() < MIN_TOKEN_LENGTH {
        return Err(CliError::validation("Invalid token format"));
    }

    let client = ctx.client_with_token(&token)?;
    match check_connection(&client).await {
        Ok(()) => writeln!(
            out,
            "{}",
            error_utils::stdout_styled(cformat!("<green>✓ Token validated successfully</green>"))
        )?,
        Err(e) => {
            writeln!(
                out,
                "{}",
                error_utils::stdout_styled(cformat!(
                    "<yellow>⚠ Warning: Could not validate token: {}</yellow>",
                    e
                ))
            )?;
            writeln!(out, "Token saved but may not be valid.")?;
        }
    }

    ctx.credential_store().save(&token)?;
    writeln!(
        out,
        "{}",
        error_utils::stdout_styled(cformat!("<green>✓ Configuration saved</green>"))
    )?;

    Ok(())
}

/// Remove the saved credentials
pub fn clear(ctx: &ExecutionContext, out: &mut dyn Write) -> Result<(), CliError> {
    if ctx.credential_store().clear()? {
        writeln!(
            out,
            "{}",
            error_utils::stdout_styled(cformat!("<green>Credentials cleared</green>"))
        )?;
    } else {
        writeln!(out, "No saved credentials")?;
    }
    Ok(())
}

/// Show whether a token is saved and whether the API accepts it.
///
/// A failed connection test is reported, not returned as an error.
pub async fn status(ctx: &ExecutionContext, out: &mut dyn Write) -> Result<(), CliError> {
    let token = match ctx.credential_store().load()? {
        Some(token) => token,
        None => {
            writeln!(
                out,
                "{}",
                error_utils::stdout_styled(cformat!("<yellow>Status: Not configured</yellow>"))
            )?;
            writeln!(out, "Run 'site24x7 auth configure' to set up authentication.")?;
            return Ok(());
        }
    };

    writeln!(
        out,
        "{}",
        error_utils::stdout_styled(cformat!(
            "<green>Status: Configured</green> (Token: {})",
            mask_token(&token)
        ))
    )?;

    let client = ctx.client_with_token(&token)?;
    match check_connection(&client).await {
        Ok(()) => writeln!(
            out,
            "{}",
            error_utils::stdout_styled(cformat!("<green>✓ Connection: Active</green>"))
        )?,
        Err(e) => writeln!(
            out,
            "{}",
            error_utils::stdout_styled(cformat!("<red>✗ Connection: Failed ({})</red>", e))
        )?,
    }

    Ok(())
}

/// Hide all but the last few characters of a token
pub fn mask_token(token: &str) -> String {
    let length = token.chars().count();
    if length > VISIBLE_TOKEN_SUFFIX {
        let suffix: String = token.chars().skip(length - VISIBLE_TOKEN_SUFFIX).collect();
        format!("***{}", suffix)
    } else {
        "***".to_string()
    }
}

async fn check_connection(client: &Site24x7Client) -> Result<(), CliError> {
    debug!("Testing connection to {}...", client.base_url());
    let response = client.get(CURRENT_STATUS_PATH).await?;
    trace!("Current status: {:?}", response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{configuration::Configuration, format::OutputFormat};
    use httpmock::MockServer;

    const TOKEN: &str = "1000.0123456789abcdef0123456789abcdef";

    fn context(base_url: &str, dir: &tempfile::TempDir) -> ExecutionContext {
        let configuration =
            Configuration::new(base_url, OutputFormat::Table, dir.path().to_path_buf()).unwrap();
        ExecutionContext::new(configuration, OutputFormat::Table, false, None, None)
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token(TOKEN), "***89abcdef");
        assert_eq!(mask_token("12345678"), "***");
        assert_eq!(mask_token(""), "***");
    }

    #[tokio::test]
    async fn test_configure_validates_and_saves() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/current_status")
                .header("authorization", format!("Zoho-oauthtoken {}", TOKEN));
            then.status(200).body(r#"{"code":0}"#);
        });

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.base_url(), &dir);
        let mut out = Vec::new();
        configure(&ctx, Some(TOKEN), &mut out).await.unwrap();

        mock.assert();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Token validated successfully"));
        assert!(output.contains("Configuration saved"));
        assert_eq!(ctx.credential_store().load().unwrap().as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_configure_saves_token_when_validation_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/current_status");
            then.status(401).body(r#"{"message":"Invalid token"}"#);
        });

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.base_url(), &dir);
        let mut out = Vec::new();
        configure(&ctx, Some(TOKEN), &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Could not validate token"));
        assert!(output.contains("Token saved but may not be valid."));
        assert_eq!(ctx.credential_store().load().unwrap().as_deref(), Some(TOKEN));
    }

    #[tokio::test]
    async fn test_configure_rejects_short_token() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("http://127.0.0.1:1", &dir);
        let mut out = Vec::new();

        let result = configure(&ctx, Some("too-short"), &mut out).await;
        assert!(matches!(result, Err(CliError::Validation(_))));
        assert_eq!(ctx.credential_store().load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_status_without_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("http://127.0.0.1:1", &dir);
        let mut out = Vec::new();
        status(&ctx, &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Status: Not configured"));
        assert!(output.contains("site24x7 auth configure"));
    }

    #[tokio::test]
    async fn test_status_reports_failed_connection() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("http://127.0.0.1:1", &dir);
        ctx.credential_store().save(TOKEN).unwrap();

        let mut out = Vec::new();
        status(&ctx, &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Status: Configured"));
        assert!(output.contains("***89abcdef"));
        assert!(output.contains("Connection: Failed"));
    }

    #[test]
    fn test_clear_reports_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("http://127.0.0.1:1", &dir);
        ctx.credential_store().save(TOKEN).unwrap();

        let mut out = Vec::new();
        clear(&ctx, &mut out).unwrap();
        clear(&ctx, &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Credentials cleared"));
        assert!(output.contains("No saved credentials"));
    }
}
