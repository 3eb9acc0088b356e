//! CLI module
//!
//! Command-line interface for the dataset query service.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API
//! - `schema` - Print the inferred schema
//! - `query` - Filter, sort and page through the dataset once
//! - `distinct` - Print the distinct values of a field

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve};
