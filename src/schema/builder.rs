//! Schema construction from a sample record set

use super::inference::TypeInferrer;
use super::naming::to_camel_case;
use super::types::{FieldSchema, Schema};
use crate::error::{Error, Result};
use crate::types::{FieldType, JsonValue, RawRecord};
use crate::value::distinct_present;
use tracing::debug;

/// Builds a [`Schema`] from raw records
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    inferrer: TypeInferrer,
}

impl SchemaBuilder {
    /// Create a builder with the default inferrer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom inferrer
    pub fn with_inferrer(inferrer: TypeInferrer) -> Self {
        Self { inferrer }
    }

    /// Derive the schema of `sample`.
    ///
    /// Fields are the keys of the first record, in that record's order.
    /// Each field's type is inferred from its values across all records.
    /// Keys that only appear in later records are not part of the schema.
    pub fn build(&self, sample: &[RawRecord]) -> Result<Schema> {
        let first = sample.first().ok_or(Error::EmptyDataset)?;
        let mut schema = Schema::new();

        for display in first.keys() {
            let field_type = self.inferrer.infer(column(sample, display));
            let name = to_camel_case(display);

            let field = if field_type == FieldType::Option {
                let options = distinct_present(column(sample, display))
                    .into_iter()
                    .cloned()
                    .collect();
                FieldSchema::option(display.as_str(), name, options)
            } else {
                FieldSchema::new(display.as_str(), name, field_type)
            };

            debug!(
                display = %field.display,
                name = %field.name,
                field_type = %field.field_type,
                "Inferred field"
            );
            schema.add_field(field)?;
        }

        Ok(schema)
    }
}

/// Values of one field across all records, `None` where the key is absent
fn column<'a>(
    sample: &'a [RawRecord],
    display: &'a str,
) -> impl Iterator<Item = Option<&'a JsonValue>> + 'a {
    sample.iter().map(move |record| record.get(display))
}

/// Build a schema with default settings (convenience function)
pub fn build_schema(sample: &[RawRecord]) -> Result<Schema> {
    SchemaBuilder::new().build(sample)
}
