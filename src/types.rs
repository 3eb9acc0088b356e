//! Common types used throughout dataset-query
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// A record as received from the data source, keyed by display name.
///
/// Key order is the order of the source document.
pub type RawRecord = serde_json::Map<String, JsonValue>;

// ============================================================================
// Field Type
// ============================================================================

/// Semantic type of a dataset field
///
/// Inference attempts the variants in declaration order; the first one
/// that accepts every value wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Boolean,
    Integer,
    Float,
    Date,
    Option,
    Text,
}

impl FieldType {
    /// Whether values of this type are kept as text in their typed form
    pub fn is_textual(self) -> bool {
        matches!(self, FieldType::Option | FieldType::Text)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::Date => write!(f, "DATE"),
            FieldType::Option => write!(f, "OPTION"),
            FieldType::Text => write!(f, "TEXT"),
        }
    }
}

// ============================================================================
// Sort Direction
// ============================================================================

/// Sort direction for ordered queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first, nulls last
    #[default]
    Asc,
    /// Largest first, nulls first
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}
