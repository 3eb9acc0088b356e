//! In-memory data source

use super::DataSource;
use crate::error::{Error, Result};
use crate::types::{JsonValue, RawRecord};
use async_trait::async_trait;

/// Data source over a fixed set of records
#[derive(Debug, Clone, Default)]
pub struct StaticDataSource {
    records: Vec<RawRecord>,
}

impl StaticDataSource {
    /// Wrap an existing record set
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Build from a JSON array of objects
    pub fn from_json(value: JsonValue) -> Result<Self> {
        let records = super::http::into_records(value)?;
        Ok(Self { records })
    }

    /// Parse a JSON document holding an array of objects
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(text)?;
        Self::from_json(value)
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the source holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("static dataset ({} records)", self.records.len())
    }
}

impl TryFrom<JsonValue> for StaticDataSource {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::from_json(value)
    }
}
