//! Shared command parameters for all CLI commands.
//!
//! This module defines the command and parameter names and the argument
//! builders reused across command modules.

use crate::{
    configuration::ENV_OUTPUT_FORMAT,
    format::OutputFormat,
    model::MonitorStatus,
};
use clap::{builder::PossibleValuesParser, Arg, ArgAction};
use std::path::PathBuf;

// CRUD operations
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_UPDATE: &str = "update";
pub const COMMAND_DELETE: &str = "delete";

// Auth commands
pub const COMMAND_AUTH: &str = "auth";
pub const COMMAND_CONFIGURE: &str = "configure";
pub const COMMAND_CLEAR: &str = "clear";
pub const COMMAND_STATUS: &str = "status";

// Global parameter names
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_SETTINGS: &str = "settings";
pub const PARAMETER_TOKEN: &str = "token";

// Resource parameter names
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_CONFIG: &str = "config";
pub const PARAMETER_PARAM: &str = "param";
pub const PARAMETER_FORCE: &str = "force";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_OFFSET: &str = "offset";
pub const PARAMETER_STATUS: &str = "status";
pub const PARAMETER_GROUP_ID: &str = "group-id";

/// Create the global output format parameter.
///
/// It has no default value so that a format from the settings file can apply
/// when neither the flag nor the environment variable is given.
pub fn output_parameter() -> Arg {
    Arg::new(PARAMETER_OUTPUT)
        .short('o')
        .long(PARAMETER_OUTPUT)
        .num_args(1)
        .required(false)
        .env(ENV_OUTPUT_FORMAT)
        .global(true)
        .help("Output format [default: table]")
        .value_parser(PossibleValuesParser::new(OutputFormat::names()))
        .ignore_case(true)
}

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Optional YAML settings file given before the subcommand
pub fn settings_parameter() -> Arg {
    Arg::new(PARAMETER_SETTINGS)
        .short('c')
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .required(false)
        .value_name("FILE")
        .help("Settings file (YAML)")
        .value_parser(clap::value_parser!(PathBuf))
}

/// OAuth token overriding the saved credentials
pub fn token_parameter() -> Arg {
    Arg::new(PARAMETER_TOKEN)
        .long(PARAMETER_TOKEN)
        .num_args(1)
        .required(false)
        .value_name("TOKEN")
        .help("OAuth token (overrides saved credentials and environment)")
}

pub fn id_parameter() -> Arg {
    Arg::new(PARAMETER_ID)
        .num_args(1)
        .required(true)
        .help("Record ID")
}

pub fn name_parameter(required: bool) -> Arg {
    Arg::new(PARAMETER_NAME)
        .short('n')
        .long(PARAMETER_NAME)
        .num_args(1)
        .required(required)
        .help("Display name")
}

/// JSON file whose top-level keys are merged into the request body
pub fn config_file_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG)
        .short('c')
        .long(PARAMETER_CONFIG)
        .num_args(1)
        .required(false)
        .value_name("FILE")
        .help("JSON configuration file")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn param_parameter() -> Arg {
    Arg::new(PARAMETER_PARAM)
        .short('p')
        .long(PARAMETER_PARAM)
        .num_args(1)
        .action(ArgAction::Append)
        .required(false)
        .value_name("KEY=VALUE")
        .help("Additional parameter, may be repeated")
}

pub fn force_parameter() -> Arg {
    Arg::new(PARAMETER_FORCE)
        .short('f')
        .long(PARAMETER_FORCE)
        .action(ArgAction::SetTrue)
        .help("Skip confirmation")
}

pub fn limit_parameter() -> Arg {
    Arg::new(PARAMETER_LIMIT)
        .short('l')
        .long(PARAMETER_LIMIT)
        .num_args(1)
        .default_value("50")
        .help("Maximum number of results")
        .value_parser(clap::value_parser!(u32))
}

pub fn offset_parameter() -> Arg {
    Arg::new(PARAMETER_OFFSET)
        .long(PARAMETER_OFFSET)
        .num_args(1)
        .default_value("0")
        .help("Number of results to skip")
        .value_parser(clap::value_parser!(u32))
}

pub fn status_parameter() -> Arg {
    Arg::new(PARAMETER_STATUS)
        .long(PARAMETER_STATUS)
        .num_args(1)
        .required(false)
        .help("Filter by status")
        .value_parser(clap::value_parser!(MonitorStatus))
}

pub fn group_id_parameter() -> Arg {
    Arg::new(PARAMETER_GROUP_ID)
        .long(PARAMETER_GROUP_ID)
        .num_args(1)
        .required(false)
        .help("Filter by monitor group ID")
}

/// Token given to `auth configure`; prompted for when absent
pub fn configure_token_parameter() -> Arg {
    Arg::new(PARAMETER_TOKEN)
        .long(PARAMETER_TOKEN)
        .num_args(1)
        .required(false)
        .help("OAuth token to save (prompted for when omitted)")
}
