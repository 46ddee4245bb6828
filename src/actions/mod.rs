//! Command execution.
//!
//! [`execute_command`] walks the parsed command tree and hands off to the
//! authentication or resource actions. Every action writes its result to the
//! writer it is given.

use std::io::Write;

use clap::ArgMatches;

use crate::{
    commands::params::{
        COMMAND_AUTH, COMMAND_CLEAR, COMMAND_CONFIGURE, COMMAND_STATUS, PARAMETER_TOKEN,
    },
    context::ExecutionContext,
    error::CliError,
    model::find_group,
};

pub mod auth;
pub mod resources;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

/// Execute the command selected by `matches`, writing results to `out`
pub async fn execute_command(matches: &ArgMatches, out: &mut dyn Write) -> Result<(), CliError> {
    let ctx = ExecutionContext::from_args(matches)?;

    match matches.subcommand() {
        Some((COMMAND_AUTH, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CONFIGURE, sub_matches)) => {
                let token = sub_matches.get_one::<String>(PARAMETER_TOKEN);
                auth::configure(&ctx, token.map(String::as_str), out).await
            }
            Some((COMMAND_CLEAR, _)) => auth::clear(&ctx, out),
            Some((COMMAND_STATUS, _)) => auth::status(&ctx, out).await,
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((group_name, sub_matches)) => match find_group(group_name) {
            Some(group) => resources::execute_group_command(&ctx, group, sub_matches, out).await,
            None => Err(CliError::UnsupportedSubcommand(group_name.to_string())),
        },
        None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
            matches,
        ))),
    }
}
