//! CLI module for searcher
//!
//! Provides command-line interface for:
//! - translate: one criteria to a MongoDB or Elasticsearch query
//! - validate: structural validation report for one criteria
//! - schemas: registered entities and their fields

mod args;
mod commands;
mod errors;
mod io;

pub use args::{BackendArg, Cli, Command};
pub use commands::{run, run_command, schemas, translate, validate, Config, TranslateRequest};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
