//! Request payload construction.
//!
//! Payloads are built from up to three sources, each overriding the previous
//! one key by key: a base record, an optional JSON configuration file and the
//! `key=value` pairs given with `--param`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{error::CliError, model::ResourceKind};

pub const DISPLAY_NAME_KEY: &str = "display_name";
pub const MONITOR_TYPE_KEY: &str = "monitor_type";
pub const CHECK_FREQUENCY_KEY: &str = "check_frequency";
pub const TIMEOUT_KEY: &str = "timeout";

pub const DEFAULT_CHECK_FREQUENCY: &str = "5";
pub const DEFAULT_TIMEOUT: &str = "30";

/// Ordered request payload
pub type Parameters = Map<String, Value>;

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("failed to read configuration file {path:?}: {cause}")]
    ConfigFileRead {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("configuration file {path:?} is not valid JSON: {cause}")]
    ConfigFileParse {
        path: PathBuf,
        cause: serde_json::Error,
    },
    #[error("configuration file {path:?} must contain a JSON object")]
    ConfigFileNotAnObject { path: PathBuf },
}

/// Parse `key=value` pairs.
///
/// Each entry is split on its first `=` and both sides are trimmed. Later
/// entries win. Entries without `=` or with an empty key are dropped.
pub fn parse_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> Parameters {
    let mut result = Parameters::new();

    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                result.insert(
                    key.trim().to_string(),
                    Value::String(value.trim().to_string()),
                );
            }
            _ => warn!("Ignoring malformed parameter {:?}, expected key=value", pair),
        }
    }

    result
}

/// Read a JSON configuration file whose top level is an object
pub fn load_config_file(path: &Path) -> Result<Parameters, ParameterError> {
    debug!("Loading request configuration from {}...", path.display());

    let content = fs::read_to_string(path).map_err(|cause| ParameterError::ConfigFileRead {
        path: path.to_path_buf(),
        cause,
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ParameterError::ConfigFileNotAnObject {
            path: path.to_path_buf(),
        }),
        Err(cause) => Err(ParameterError::ConfigFileParse {
            path: path.to_path_buf(),
            cause,
        }),
    }
}

/// Merge the configuration file and the `key=value` pairs over `base`
pub fn merge_parameters<S: AsRef<str>>(
    base: Parameters,
    config: Option<&Path>,
    params: &[S],
) -> Result<Parameters, ParameterError> {
    let mut merged = base;

    if let Some(path) = config {
        merged.extend(load_config_file(path)?);
    }

    merged.extend(parse_key_value_pairs(params));

    trace!("Merged parameters: {:?}", merged);
    Ok(merged)
}

/// Fill in the defaults a new monitor needs, leaving keys that are already set alone
pub fn apply_create_defaults(kind: &ResourceKind, parameters: &mut Parameters) {
    if !kind.is_monitor() {
        return;
    }

    parameters
        .entry(MONITOR_TYPE_KEY)
        .or_insert_with(|| Value::String(kind.monitor_type()));
    parameters
        .entry(CHECK_FREQUENCY_KEY)
        .or_insert_with(|| Value::String(DEFAULT_CHECK_FREQUENCY.to_string()));
    parameters
        .entry(TIMEOUT_KEY)
        .or_insert_with(|| Value::String(DEFAULT_TIMEOUT.to_string()));
}

/// Payload of a create request
pub fn create_payload<S: AsRef<str>>(
    kind: &ResourceKind,
    name: &str,
    config: Option<&Path>,
    params: &[S],
) -> Result<Parameters, ParameterError> {
    let mut base = Parameters::new();
    base.insert(DISPLAY_NAME_KEY.to_string(), Value::String(name.to_string()));

    let mut payload = merge_parameters(base, config, params)?;
    apply_create_defaults(kind, &mut payload);
    Ok(payload)
}

/// Payload of an update request; an empty payload is rejected
pub fn update_payload<S: AsRef<str>>(
    name: Option<&str>,
    config: Option<&Path>,
    params: &[S],
) -> Result<Parameters, CliError> {
    let mut base = Parameters::new();
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        base.insert(DISPLAY_NAME_KEY.to_string(), Value::String(name.to_string()));
    }

    let payload = merge_parameters(base, config, params)?;
    if payload.is_empty() {
        return Err(CliError::validation("No update parameters provided"));
    }

    Ok(payload)
}

/// Record IDs are non-empty strings of ASCII digits
pub fn validate_id(id: &str) -> Result<(), CliError> {
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CliError::validation(format!("Invalid ID format: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PERFORMANCE_REPORTS, WEBSITE_MONITORS};
    use serde_json::json;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_params_override_config_and_each_other() {
        let file = config_file(r#"{"a": 1}"#);
        let merged =
            merge_parameters(Parameters::new(), Some(file.path()), &["a=2", "b=3"]).unwrap();

        assert_eq!(Value::Object(merged), json!({"a": "2", "b": "3"}));
    }

    #[test]
    fn test_later_params_win() {
        let parsed = parse_key_value_pairs(&["a=1", "a=2"]);
        assert_eq!(Value::Object(parsed), json!({"a": "2"}));
    }

    #[test]
    fn test_split_on_first_equals_and_trim() {
        let parsed = parse_key_value_pairs(&[" url = https://example.com/?q=1 "]);
        assert_eq!(
            Value::Object(parsed),
            json!({"url": "https://example.com/?q=1"})
        );
    }

    #[test]
    fn test_malformed_pairs_are_dropped() {
        let parsed = parse_key_value_pairs(&["novalue", "=orphan", "ok=1"]);
        assert_eq!(Value::Object(parsed), json!({"ok": "1"}));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let file = config_file("{ not json");
        let result = merge_parameters(Parameters::new(), Some(file.path()), &[] as &[&str]);
        assert!(matches!(result, Err(ParameterError::ConfigFileParse { .. })));

        let file = config_file("[1, 2]");
        let result = merge_parameters(Parameters::new(), Some(file.path()), &[] as &[&str]);
        assert!(matches!(
            result,
            Err(ParameterError::ConfigFileNotAnObject { .. })
        ));
    }

    #[test]
    fn test_create_payload_applies_monitor_defaults() {
        let file = config_file(r#"{"website": "https://example.com", "timeout": 10}"#);
        let payload =
            create_payload(&WEBSITE_MONITORS, "Home", Some(file.path()), &["check_frequency=1"])
                .unwrap();

        assert_eq!(
            Value::Object(payload),
            json!({
                "display_name": "Home",
                "website": "https://example.com",
                "timeout": 10,
                "check_frequency": "1",
                "monitor_type": "WEBSITE-MONITORS"
            })
        );
    }

    #[test]
    fn test_create_payload_without_defaults_for_reports() {
        let payload = create_payload(&PERFORMANCE_REPORTS, "Weekly", None, &[] as &[&str]).unwrap();
        assert_eq!(Value::Object(payload), json!({"display_name": "Weekly"}));
    }

    #[test]
    fn test_empty_update_is_rejected() {
        let result = update_payload(None, None, &[] as &[&str]);
        match result {
            Err(CliError::Validation(message)) => {
                assert_eq!(message, "No update parameters provided")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_update_payload_with_name() {
        let payload = update_payload(Some("Renamed"), None, &["timeout=60"]).unwrap();
        assert_eq!(
            Value::Object(payload),
            json!({"display_name": "Renamed", "timeout": "60"})
        );
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("123456").is_ok());
        assert!(validate_id("abc123").is_err());
        assert!(validate_id("").is_err());
        assert!(validate_id("12 34").is_err());
    }
}
