// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # dataset-query
//!
//! Schema inference and a small query API over a remote, schemaless JSON
//! dataset.
//!
//! ## Features
//!
//! - **Schema Inference**: Classify every field as BOOLEAN, INTEGER, FLOAT,
//!   DATE, OPTION or TEXT from the data itself
//! - **Name Normalization**: Display names become camelCase identifiers
//! - **Queries**: AND-of-conditions filtering, stable sorting, offset/limit
//!   pagination, counts and distinct values
//! - **HTTP API**: axum server exposing every operation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dataset_query::query::{Condition, Query};
//! use dataset_query::source::HttpDataSource;
//! use dataset_query::DatasetService;
//! use std::sync::Arc;
//!
//! # async fn run() -> dataset_query::Result<()> {
//! let source = HttpDataSource::new("https://example.com/people.json")?;
//! let service = DatasetService::new(Arc::new(source));
//!
//! let schema = service.schema().await?;
//! let adults = service
//!     .data(Some(&Query::new().with("age", Condition::gte(18))))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌────────────┐    ┌─────────────┐
//! │  DataSource  │───▶│ SchemaBuilder │───▶│ Normalizer │───▶│ QueryEngine │
//! │ HTTP/static  │    │ TypeInferrer  │    │ FieldValue │    │ filter/sort │
//! └──────────────┘    └───────────────┘    └────────────┘    └─────────────┘
//!         ▲                                                         │
//!         └──────────────── DatasetService (per request) ◀──────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Typed field values and JSON coercion helpers
pub mod value;

/// Schema inference and field naming
pub mod schema;

/// Record normalization
pub mod normalize;

/// Filtering, sorting, pagination and distinct values
pub mod query;

/// HTTP client with timeout and retry
pub mod http;

/// Dataset sources
pub mod source;

/// Per-request query pipeline
pub mod service;

/// Application configuration
pub mod config;

/// CLI commands and HTTP server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{AppConfig, ServerSettings, SourceConfig};
pub use error::{Error, Result};
pub use normalize::NormalizedRecord;
pub use query::{Condition, Query, QueryEngine};
pub use schema::{build_schema, FieldSchema, Schema};
pub use service::{DatasetService, QueryParams};
pub use source::{DataSource, HttpDataSource, StaticDataSource};
pub use types::{FieldType, RawRecord, SortDirection};
pub use value::FieldValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
