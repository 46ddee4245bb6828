//! The Site24x7 CLI client library.
//!
//! This crate provides the core functionality for the Site24x7 CLI client:
//! credential storage, the authenticated HTTP client, request parameter
//! merging, output rendering and command execution.
//!
//! # Modules
//!
//! - `actions`: Command execution (authentication and resource operations)
//! - `client`: Authenticated HTTP client for the Site24x7 REST API
//! - `commands`: CLI command definitions and argument parsing
//! - `configuration`: Configuration management (environment and settings file)
//! - `context`: Execution context shared by all commands
//! - `credentials`: Persistent OAuth token storage
//! - `error`: Top level error type
//! - `error_utils`: Consistent error and warning reporting
//! - `exit_codes`: Process exit codes
//! - `format`: Output rendering (table, JSON, YAML)
//! - `model`: Resource catalog and list query model
//! - `param_utils`: Request parameter merging and ID validation

pub mod actions;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod credentials;
pub mod error;
pub mod error_utils;
pub mod exit_codes;
pub mod format;
pub mod model;
pub mod param_utils;
