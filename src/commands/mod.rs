//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! The `auth` group is fixed; one command group is generated for every entry of
//! the resource catalog.

use clap::Command;

pub mod auth;
pub mod params;
pub mod resource;

use crate::model::RESOURCE_GROUPS;
use params::{output_parameter, settings_parameter, token_parameter, verbose_parameter};

/// Create the complete command tree of the Site24x7 CLI.
pub fn create_cli_command() -> Command {
    let mut command = Command::new("site24x7")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(settings_parameter())
        .arg(output_parameter())
        .arg(verbose_parameter())
        .arg(token_parameter())
        .subcommand(auth::auth_command());

    for group in RESOURCE_GROUPS {
        command = command.subcommand(resource::group_command(group));
    }

    command
}
