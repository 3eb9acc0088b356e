//! Query types

use crate::types::JsonValue;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// Whether an ordering of `value` against the operand satisfies this operator.
    ///
    /// `None` (incomparable) never satisfies.
    pub fn accepts(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Comparison::Eq => ordering == Ordering::Equal,
            Comparison::Gt => ordering == Ordering::Greater,
            Comparison::Gte => ordering != Ordering::Less,
            Comparison::Lt => ordering == Ordering::Less,
            Comparison::Lte => ordering != Ordering::Greater,
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparison::Eq => write!(f, "eq"),
            Comparison::Gt => write!(f, "gt"),
            Comparison::Gte => write!(f, "gte"),
            Comparison::Lt => write!(f, "lt"),
            Comparison::Lte => write!(f, "lte"),
        }
    }
}

/// Comparison against a single field
///
/// Only the first operator present, in the order `eq`, `gt`, `gte`, `lt`,
/// `lte`, is applied. An explicit `null` operand counts as present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub eq: Option<JsonValue>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gt: Option<JsonValue>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub gte: Option<JsonValue>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lt: Option<JsonValue>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub lte: Option<JsonValue>,
}

/// Deserialize a field that is present in the input, keeping `null` as a value
fn present<'de, D>(deserializer: D) -> Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(deserializer).map(Some)
}

impl Condition {
    /// Condition `value == operand`
    pub fn eq(operand: impl Into<JsonValue>) -> Self {
        Self {
            eq: Some(operand.into()),
            ..Self::default()
        }
    }

    /// Condition `value > operand`
    pub fn gt(operand: impl Into<JsonValue>) -> Self {
        Self {
            gt: Some(operand.into()),
            ..Self::default()
        }
    }

    /// Condition `value >= operand`
    pub fn gte(operand: impl Into<JsonValue>) -> Self {
        Self {
            gte: Some(operand.into()),
            ..Self::default()
        }
    }

    /// Condition `value < operand`
    pub fn lt(operand: impl Into<JsonValue>) -> Self {
        Self {
            lt: Some(operand.into()),
            ..Self::default()
        }
    }

    /// Condition `value <= operand`
    pub fn lte(operand: impl Into<JsonValue>) -> Self {
        Self {
            lte: Some(operand.into()),
            ..Self::default()
        }
    }

    /// The operator that applies, with its operand.
    ///
    /// `None` means the condition is trivially satisfied.
    pub fn predicate(&self) -> Option<(Comparison, &JsonValue)> {
        [
            (Comparison::Eq, &self.eq),
            (Comparison::Gt, &self.gt),
            (Comparison::Gte, &self.gte),
            (Comparison::Lt, &self.lt),
            (Comparison::Lte, &self.lte),
        ]
        .into_iter()
        .find_map(|(cmp, operand)| operand.as_ref().map(|v| (cmp, v)))
    }
}

/// Field name to condition map, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    conditions: BTreeMap<String, Condition>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition on a field
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, condition: Condition) -> Self {
        self.conditions.insert(field.into(), condition);
        self
    }

    /// Parse a query from a JSON string
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::invalid_query(format!("malformed where clause: {e}")))
    }

    /// Iterate over field/condition pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Condition)> {
        self.conditions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if the query has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Number of conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }
}
