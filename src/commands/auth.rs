//! Authentication command definitions.
//!
//! This module defines CLI commands related to the saved OAuth token.

use crate::commands::params::{
    configure_token_parameter, COMMAND_AUTH, COMMAND_CLEAR, COMMAND_CONFIGURE, COMMAND_STATUS,
};
use clap::Command;

/// Create the authentication command with all its subcommands.
pub fn auth_command() -> Command {
    Command::new(COMMAND_AUTH)
        .about("Authentication management")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_CONFIGURE)
                .about("Validate and save an OAuth token")
                .arg(configure_token_parameter()),
        )
        .subcommand(Command::new(COMMAND_CLEAR).about("Remove the saved credentials"))
        .subcommand(
            Command::new(COMMAND_STATUS).about("Show the saved token and test the connection"),
        )
}
