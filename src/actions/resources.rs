//! Resource actions: list, get, create, update and delete.
//!
//! The request functions work on any [`ResourceKind`] and return the relevant
//! part of the response. [`execute_group_command`] maps parsed arguments onto
//! them and renders the result.

use std::io::Write;
use std::path::PathBuf;

use clap::ArgMatches;
use color_print::cformat;
use inquire::InquireError;
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    client::Site24x7Client,
    commands::params::{
        COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET, COMMAND_LIST, COMMAND_UPDATE,
        PARAMETER_CONFIG, PARAMETER_FORCE, PARAMETER_GROUP_ID, PARAMETER_ID, PARAMETER_LIMIT,
        PARAMETER_NAME, PARAMETER_OFFSET, PARAMETER_PARAM, PARAMETER_STATUS,
    },
    context::ExecutionContext,
    error::CliError,
    error_utils,
    format::{self, OutputFormat},
    model::{extract_record, extract_records, ListQuery, MonitorStatus, ResourceGroup, ResourceKind},
    param_utils::{self, Parameters},
};

/// A resource operation with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceOperation {
    List(ListQuery),
    Get {
        id: String,
    },
    Create {
        name: String,
        config: Option<PathBuf>,
        params: Vec<String>,
    },
    Update {
        id: String,
        name: Option<String>,
        config: Option<PathBuf>,
        params: Vec<String>,
    },
    Delete {
        id: String,
        force: bool,
    },
}

impl ResourceOperation {
    pub fn from_matches(operation: &str, matches: &ArgMatches) -> Result<Self, CliError> {
        match operation {
            COMMAND_LIST => Ok(ResourceOperation::List(ListQuery {
                limit: *required::<u32>(matches, PARAMETER_LIMIT)?,
                offset: *required::<u32>(matches, PARAMETER_OFFSET)?,
                status: matches.get_one::<MonitorStatus>(PARAMETER_STATUS).copied(),
                group_id: matches.get_one::<String>(PARAMETER_GROUP_ID).cloned(),
            })),
            COMMAND_GET => Ok(ResourceOperation::Get {
                id: required::<String>(matches, PARAMETER_ID)?.clone(),
            }),
            COMMAND_CREATE => Ok(ResourceOperation::Create {
                name: required::<String>(matches, PARAMETER_NAME)?.clone(),
                config: matches.get_one::<PathBuf>(PARAMETER_CONFIG).cloned(),
                params: params(matches),
            }),
            COMMAND_UPDATE => Ok(ResourceOperation::Update {
                id: required::<String>(matches, PARAMETER_ID)?.clone(),
                name: matches.get_one::<String>(PARAMETER_NAME).cloned(),
                config: matches.get_one::<PathBuf>(PARAMETER_CONFIG).cloned(),
                params: params(matches),
            }),
            COMMAND_DELETE => Ok(ResourceOperation::Delete {
                id: required::<String>(matches, PARAMETER_ID)?.clone(),
                force: matches.get_flag(PARAMETER_FORCE),
            }),
            other => Err(CliError::UnsupportedSubcommand(other.to_string())),
        }
    }
}

fn required<'a, T: Clone + Send + Sync + 'static>(
    matches: &'a ArgMatches,
    name: &str,
) -> Result<&'a T, CliError> {
    matches
        .get_one::<T>(name)
        .ok_or_else(|| CliError::MissingRequiredArgument(name.to_string()))
}

fn params(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>(PARAMETER_PARAM)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Dispatch `<group> <resource> <operation>`.
pub async fn execute_group_command(
    ctx: &ExecutionContext,
    group: &ResourceGroup,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let (resource_name, resource_matches) = matches
        .subcommand()
        .ok_or_else(|| CliError::UnsupportedSubcommand(group.name.to_string()))?;
    let kind = group
        .resource(resource_name)
        .ok_or_else(|| CliError::UnsupportedSubcommand(resource_name.to_string()))?;
    let (operation_name, operation_matches) = resource_matches
        .subcommand()
        .ok_or_else(|| CliError::UnsupportedSubcommand(resource_name.to_string()))?;

    let operation = ResourceOperation::from_matches(operation_name, operation_matches)?;
    trace!("Executing {:?} on {}", operation, kind.name);

    let client = ctx.authenticated_client()?;
    execute_operation(&client, kind, operation, ctx.output_format(), out).await
}

/// Run one operation and render its result
pub async fn execute_operation(
    client: &Site24x7Client,
    kind: &ResourceKind,
    operation: ResourceOperation,
    output_format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let result = match operation {
        ResourceOperation::List(query) => list_records(client, kind, &query).await?,
        ResourceOperation::Get { id } => get_record(client, kind, &id).await?,
        ResourceOperation::Create {
            name,
            config,
            params,
        } => {
            let payload = param_utils::create_payload(kind, &name, config.as_deref(), params.as_slice())?;
            create_record(client, kind, &payload).await?
        }
        ResourceOperation::Update {
            id,
            name,
            config,
            params,
        } => {
            param_utils::validate_id(&id)?;
            let payload = param_utils::update_payload(name.as_deref(), config.as_deref(), params.as_slice())?;
            update_record(client, kind, &id, &payload).await?
        }
        ResourceOperation::Delete { id, force } => {
            param_utils::validate_id(&id)?;
            if !force {
                confirm_deletion(kind, &id)?;
            }

            let response = delete_record(client, kind, &id).await?;
            if has_data(&response) || output_format != OutputFormat::Table {
                response
            } else {
                let notice = cformat!("<green>Deleted {} {}</green>", kind.title, id);
                writeln!(out, "{}", error_utils::stdout_styled(notice))?;
                return Ok(());
            }
        }
    };

    format::render(&result, output_format, out)?;
    Ok(())
}

pub async fn list_records(
    client: &Site24x7Client,
    kind: &ResourceKind,
    query: &ListQuery,
) -> Result<Value, CliError> {
    let path = kind.list_path(query)?;
    debug!("Listing {} with {}", kind.name, path);
    let response = client.get(&path).await?;
    Ok(extract_records(kind, response))
}

pub async fn get_record(
    client: &Site24x7Client,
    kind: &ResourceKind,
    id: &str,
) -> Result<Value, CliError> {
    param_utils::validate_id(id)?;
    let response = client.get(&kind.record_path(id)).await?;
    Ok(extract_record(response))
}

pub async fn create_record(
    client: &Site24x7Client,
    kind: &ResourceKind,
    payload: &Parameters,
) -> Result<Value, CliError> {
    debug!("Creating {} record", kind.name);
    let response = client.post(kind.collection_path(), payload).await?;
    Ok(extract_record(response))
}

pub async fn update_record(
    client: &Site24x7Client,
    kind: &ResourceKind,
    id: &str,
    payload: &Parameters,
) -> Result<Value, CliError> {
    param_utils::validate_id(id)?;
    debug!("Updating {} record {}", kind.name, id);
    let response = client.put(&kind.record_path(id), payload).await?;
    Ok(extract_record(response))
}

/// Delete a record, returning the raw response body
pub async fn delete_record(
    client: &Site24x7Client,
    kind: &ResourceKind,
    id: &str,
) -> Result<Value, CliError> {
    param_utils::validate_id(id)?;
    debug!("Deleting {} record {}", kind.name, id);
    Ok(client.delete(&kind.record_path(id)).await?)
}

/// Ask before deleting; anything but an explicit yes aborts
fn confirm_deletion(kind: &ResourceKind, id: &str) -> Result<(), CliError> {
    let answer = inquire::Confirm::new(&format!(
        "Are you sure you want to delete {} {}?",
        kind.title, id
    ))
    .with_default(false)
    .prompt();

    match answer {
        Ok(true) => Ok(()),
        Ok(false)
        | Err(InquireError::OperationCanceled)
        | Err(InquireError::OperationInterrupted)
        | Err(InquireError::NotTTY) => Err(CliError::Aborted),
        Err(e) => Err(e.into()),
    }
}

fn has_data(response: &Value) -> bool {
    match response {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}
