//! CLI argument definitions using clap
//!
//! Commands:
//! - searcher translate --config <path> --entity <name> --backend <mongo|elastic>
//! - searcher validate
//! - searcher schemas --config <path>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::translator::Backend;

/// searcher - translate search criteria into MongoDB and Elasticsearch queries
#[derive(Parser, Debug)]
#[command(name = "searcher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate one request read from stdin
    Translate {
        /// Path to configuration file
        #[arg(long, default_value = "./searcher.json")]
        config: PathBuf,

        /// Entity whose schema the criteria is checked against
        #[arg(long)]
        entity: String,

        /// Target query language
        #[arg(long, value_enum)]
        backend: BackendArg,
    },

    /// Report structural validation errors of a criteria read from stdin
    Validate,

    /// List registered entities and their fields
    Schemas {
        /// Path to configuration file
        #[arg(long, default_value = "./searcher.json")]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Mongo,
    Elastic,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Mongo => Backend::Mongo,
            BackendArg::Elastic => Backend::Elastic,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
