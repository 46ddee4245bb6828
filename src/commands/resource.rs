//! Resource command definitions.
//!
//! Every resource group becomes a top level command with one subcommand per
//! resource type, each offering the same five operations.

use crate::{
    commands::params::{
        config_file_parameter, force_parameter, group_id_parameter, id_parameter,
        limit_parameter, name_parameter, offset_parameter, param_parameter, status_parameter,
        COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET, COMMAND_LIST, COMMAND_UPDATE,
    },
    model::{ResourceGroup, ResourceKind},
};
use clap::Command;

/// Create the command for a resource group with all its resource types.
pub fn group_command(group: &ResourceGroup) -> Command {
    let mut command = Command::new(group.name)
        .about(group.about)
        .subcommand_required(true)
        .arg_required_else_help(true);

    for kind in group.resources {
        command = command.subcommand(resource_command(kind));
    }

    command
}

/// Create the command for a single resource type.
pub fn resource_command(kind: &ResourceKind) -> Command {
    Command::new(kind.name)
        .about(format!("Manage {}", kind.title))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about(format!("List {}", kind.title))
                .visible_alias("ls")
                .arg(limit_parameter())
                .arg(offset_parameter())
                .arg(status_parameter())
                .arg(group_id_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about(format!("Get details of a record of {}", kind.title))
                .arg(id_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about(format!("Create a new record of {}", kind.title))
                .arg(name_parameter(true))
                .arg(config_file_parameter())
                .arg(param_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_UPDATE)
                .about(format!("Update a record of {}", kind.title))
                .arg(id_parameter())
                .arg(name_parameter(false))
                .arg(config_file_parameter())
                .arg(param_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about(format!("Delete a record of {}", kind.title))
                .arg(id_parameter())
                .arg(force_parameter()),
        )
}
