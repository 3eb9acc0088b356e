//! Normalized records

use crate::schema::Schema;
use crate::types::{JsonValue, RawRecord};
use crate::value::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One field of a normalized record
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Normalized field name
    pub name: String,
    /// Raw value as received, or null when the field was absent
    pub raw: JsonValue,
    /// Raw value interpreted under the field's type
    pub value: FieldValue,
}

/// A record keyed by normalized field names, in schema order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    cells: Vec<Cell>,
}

impl NormalizedRecord {
    /// Get a cell by normalized name
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }

    /// Get the typed value of a field
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).map(|c| &c.value)
    }

    /// Get the raw value of a field
    pub fn raw(&self, name: &str) -> Option<&JsonValue> {
        self.get(name).map(|c| &c.raw)
    }

    /// Cells in schema order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Field names in schema order
    pub fn names(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert to a JSON object of raw values
    pub fn to_json(&self) -> JsonValue {
        let map: serde_json::Map<String, JsonValue> = self
            .cells
            .iter()
            .map(|c| (c.name.clone(), c.raw.clone()))
            .collect();
        JsonValue::Object(map)
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for cell in &self.cells {
            map.serialize_entry(&cell.name, &cell.raw)?;
        }
        map.end()
    }
}

/// Map a raw record onto the schema.
///
/// Output has exactly one cell per schema field, in schema order. Absent
/// fields become null and keys outside the schema are dropped. Never fails.
pub fn normalize(row: &RawRecord, schema: &Schema) -> NormalizedRecord {
    let cells = schema
        .iter()
        .map(|field| {
            let raw = row.get(&field.display).cloned().unwrap_or(JsonValue::Null);
            let value = FieldValue::from_raw(&raw, field.field_type);
            Cell {
                name: field.name.clone(),
                raw,
                value,
            }
        })
        .collect();

    NormalizedRecord { cells }
}

/// Normalize every record of a dataset
pub fn normalize_all(rows: &[RawRecord], schema: &Schema) -> Vec<NormalizedRecord> {
    rows.iter().map(|row| normalize(row, schema)).collect()
}
