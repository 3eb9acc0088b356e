//! Schema types

use crate::error::{Error, Result};
use crate::types::{FieldType, JsonValue};
use serde::{Deserialize, Serialize};

/// Schema entry for one dataset field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Key as it appears in the raw records
    pub display: String,

    /// Normalized identifier used in normalized records and queries
    pub name: String,

    /// Inferred semantic type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Distinct raw values, present only for `OPTION` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<JsonValue>>,
}

impl FieldSchema {
    /// Create a field without options
    pub fn new(display: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            display: display.into(),
            name: name.into(),
            field_type,
            options: None,
        }
    }

    /// Create an `OPTION` field with its enumerated values
    pub fn option(
        display: impl Into<String>,
        name: impl Into<String>,
        options: Vec<JsonValue>,
    ) -> Self {
        Self {
            display: display.into(),
            name: name.into(),
            field_type: FieldType::Option,
            options: Some(options),
        }
    }
}

/// Ordered field schema of a dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    ///
    /// Fails if another field already uses the same normalized name.
    pub fn add_field(&mut self, field: FieldSchema) -> Result<()> {
        if let Some(existing) = self.get(&field.name) {
            return Err(Error::NameCollision {
                name: field.name,
                first: existing.display.clone(),
                second: field.display,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Fields in schema order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Iterate over fields in schema order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldSchema> {
        self.fields.iter()
    }

    /// Look up a field by normalized name
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field by normalized name, failing with `UnknownField`
    pub fn require(&self, name: &str) -> Result<&FieldSchema> {
        self.get(name).ok_or_else(|| Error::unknown_field(name))
    }

    /// Normalized names in schema order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldSchema;
    type IntoIter = std::slice::Iter<'a, FieldSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
