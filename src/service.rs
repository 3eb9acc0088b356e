//! Dataset service
//!
//! Runs the per-request pipeline: fetch the raw records, derive the schema,
//! normalize every row, then hand the rows to the [`QueryEngine`]. Nothing is
//! cached between calls, so concurrent requests share no mutable state.

use crate::error::{Error, Result};
use crate::normalize::{normalize_all, NormalizedRecord};
use crate::query::{Query, QueryEngine};
use crate::schema::{Schema, SchemaBuilder};
use crate::source::DataSource;
use crate::types::{JsonValue, SortDirection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Parameters accepted by the data operations
///
/// This is the JSON body of every `POST` route; each operation reads only the
/// parameters it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Filter conditions keyed by normalized field name
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Query>,

    /// Page size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Rows to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,

    /// Field to sort by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Sort direction, ascending unless given
    #[serde(default)]
    pub direction: SortDirection,
}

impl QueryParams {
    /// Parameters carrying only a filter
    pub fn filtered(query: Query) -> Self {
        Self {
            filter: Some(query),
            ..Self::default()
        }
    }
}

/// A derived view of the dataset for one request
#[derive(Debug)]
pub struct Snapshot {
    /// Schema inferred from the fetched records
    pub schema: Schema,
    /// Every record, normalized against `schema`
    pub rows: Vec<NormalizedRecord>,
}

/// Query service over a single data source
#[derive(Clone)]
pub struct DatasetService {
    source: Arc<dyn DataSource>,
    builder: SchemaBuilder,
}

impl DatasetService {
    /// Create a service over `source`
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self {
            source,
            builder: SchemaBuilder::new(),
        }
    }

    /// Use a custom schema builder
    pub fn with_schema_builder(mut self, builder: SchemaBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Description of the underlying data source
    pub fn describe_source(&self) -> String {
        self.source.describe()
    }

    /// Fetch the dataset and derive schema and normalized rows
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let raw = self.source.fetch().await?;
        let schema = self.builder.build(&raw)?;
        let rows = normalize_all(&raw, &schema);
        debug!(
            fields = schema.len(),
            rows = rows.len(),
            "Derived dataset snapshot"
        );
        Ok(Snapshot { schema, rows })
    }

    /// The inferred schema
    pub async fn schema(&self) -> Result<Schema> {
        Ok(self.snapshot().await?.schema)
    }

    /// All rows matching `query`
    pub async fn data(&self, query: Option<&Query>) -> Result<Vec<NormalizedRecord>> {
        let Snapshot { schema, rows } = self.snapshot().await?;
        QueryEngine::new(&schema).filter(rows, query)
    }

    /// Matching rows sliced by `offset` and `limit`
    pub async fn data_paginated(
        &self,
        query: Option<&Query>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<NormalizedRecord>> {
        let Snapshot { schema, rows } = self.snapshot().await?;
        let engine = QueryEngine::new(&schema);
        let rows = engine.filter(rows, query)?;
        Ok(engine.paginate(rows, limit, offset))
    }

    /// Matching rows ordered by `order_by`
    pub async fn data_sorted(
        &self,
        query: Option<&Query>,
        order_by: Option<&str>,
        direction: SortDirection,
    ) -> Result<Vec<NormalizedRecord>> {
        let Snapshot { schema, rows } = self.snapshot().await?;
        let engine = QueryEngine::new(&schema);
        let rows = engine.filter(rows, query)?;
        engine.sort(rows, order_by, direction)
    }

    /// Full pipeline: filter, sort, then paginate
    pub async fn run(&self, params: &QueryParams) -> Result<Vec<NormalizedRecord>> {
        let Snapshot { schema, rows } = self.snapshot().await?;
        let engine = QueryEngine::new(&schema);
        let rows = engine.filter(rows, params.filter.as_ref())?;
        let rows = engine.sort(rows, params.order_by.as_deref(), params.direction)?;
        Ok(engine.paginate(rows, params.limit, params.offset))
    }

    /// Number of records in the dataset
    ///
    /// An empty dataset counts as zero rather than failing.
    pub async fn count(&self) -> Result<usize> {
        self.count_filtered(None).await
    }

    /// Number of records matching `query`; zero for an empty dataset
    pub async fn count_filtered(&self, query: Option<&Query>) -> Result<usize> {
        match self.data(query).await {
            Ok(rows) => Ok(rows.len()),
            Err(Error::EmptyDataset) => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Distinct values of `field`
    pub async fn distinct(&self, field: &str) -> Result<Vec<JsonValue>> {
        let Snapshot { schema, rows } = self.snapshot().await?;
        QueryEngine::new(&schema).distinct(&rows, field)
    }
}

impl std::fmt::Debug for DatasetService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetService")
            .field("source", &self.source.describe())
            .finish_non_exhaustive()
    }
}
