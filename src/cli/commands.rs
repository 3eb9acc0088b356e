//! CLI commands and argument parsing

use crate::types::SortDirection;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema inference and query API over a remote JSON dataset
#[derive(Parser, Debug)]
#[command(name = "dataset-query")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset URL (overrides the config file)
    #[arg(short = 'u', long, global = true, env = "DATASET_URL")]
    pub data_url: Option<String>,

    /// Path to the record array inside the response (e.g. `data.items`)
    #[arg(long, global = true)]
    pub records_path: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the inferred schema
    Schema,

    /// Run a query once and print the matching records
    Query {
        /// Filter conditions as JSON, e.g. '{"age":{"gt":26}}'
        #[arg(short = 'w', long = "where")]
        filter: Option<String>,

        /// Field to sort by
        #[arg(long)]
        order_by: Option<String>,

        /// Sort direction
        #[arg(long, default_value = "asc")]
        direction: SortDirection,

        /// Maximum records to return
        #[arg(long)]
        limit: Option<usize>,

        /// Records to skip
        #[arg(long)]
        offset: Option<usize>,

        /// Print the number of matching records instead of the records
        #[arg(long)]
        count: bool,
    },

    /// Print the distinct values of a field
    Distinct {
        /// Normalized field name
        field: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
