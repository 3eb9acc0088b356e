//! Schema inference module
//!
//! Derives a typed, ordered field schema from schemaless JSON records.
//!
//! # Features
//!
//! - **Type Inference**: Classifies each column as BOOLEAN, INTEGER, FLOAT,
//!   DATE, OPTION or TEXT
//! - **Name Normalization**: Maps display names to camel-case identifiers
//! - **Option Detection**: Enumerates the values of low-cardinality fields
//! - **Collision Detection**: Rejects schemas where two fields share a name

mod builder;
mod inference;
mod naming;
mod types;

pub use builder::{build_schema, SchemaBuilder};
pub use inference::{infer_type, TypeInferrer, DEFAULT_MAX_OPTIONS};
pub use naming::{deburr, split_words, to_camel_case};
pub use types::{FieldSchema, Schema};

#[cfg(test)]
mod tests;
