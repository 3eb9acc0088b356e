//! Query evaluation over normalized records

use super::types::{Comparison, Query};
use crate::error::Result;
use crate::normalize::NormalizedRecord;
use crate::schema::Schema;
use crate::types::{JsonValue, SortDirection};
use crate::value::{distinct_present, FieldValue};
use std::cmp::Ordering;
use tracing::debug;

/// A condition resolved against the schema
#[derive(Debug)]
struct Predicate<'q> {
    field: &'q str,
    comparison: Comparison,
    operand: FieldValue,
}

impl Predicate<'_> {
    fn matches(&self, row: &NormalizedRecord) -> bool {
        row.value(self.field)
            .is_some_and(|value| self.comparison.accepts(value.compare(&self.operand)))
    }
}

/// Evaluates queries against records normalized with one schema
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    schema: &'a Schema,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine for records normalized with `schema`
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Keep the rows that satisfy every condition of `query`.
    ///
    /// Operands are interpreted with the field's type before comparing.
    /// Relative row order is preserved. An absent or empty query returns
    /// `rows` unchanged.
    pub fn filter(
        &self,
        rows: Vec<NormalizedRecord>,
        query: Option<&Query>,
    ) -> Result<Vec<NormalizedRecord>> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return Ok(rows);
        };

        let predicates = self.compile(query)?;
        let total = rows.len();
        let matched: Vec<NormalizedRecord> = rows
            .into_iter()
            .filter(|row| predicates.iter().all(|p| p.matches(row)))
            .collect();

        debug!(
            conditions = query.len(),
            total,
            matched = matched.len(),
            "Filtered rows"
        );
        Ok(matched)
    }

    fn compile<'q>(&self, query: &'q Query) -> Result<Vec<Predicate<'q>>> {
        let mut predicates = Vec::new();
        for (name, condition) in query.iter() {
            let field = self.schema.require(name)?;
            if let Some((comparison, operand)) = condition.predicate() {
                predicates.push(Predicate {
                    field: name,
                    comparison,
                    operand: FieldValue::from_raw(operand, field.field_type),
                });
            }
        }
        Ok(predicates)
    }

    /// Stable sort by one field.
    ///
    /// Nulls sort after every other value ascending and before them
    /// descending. Without `order_by` the rows are returned unchanged.
    pub fn sort(
        &self,
        mut rows: Vec<NormalizedRecord>,
        order_by: Option<&str>,
        direction: SortDirection,
    ) -> Result<Vec<NormalizedRecord>> {
        let Some(field) = order_by else {
            return Ok(rows);
        };
        self.schema.require(field)?;

        rows.sort_by(|a, b| {
            let ordering = compare_optional(a.value(field), b.value(field));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        debug!(field, %direction, rows = rows.len(), "Sorted rows");
        Ok(rows)
    }

    /// Slice `rows` by offset and limit (see [`paginate`])
    pub fn paginate(
        &self,
        rows: Vec<NormalizedRecord>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Vec<NormalizedRecord> {
        paginate(rows, limit, offset)
    }

    /// Distinct raw values of a field, excluding null and empty strings,
    /// in first-occurrence order
    pub fn distinct(&self, rows: &[NormalizedRecord], field: &str) -> Result<Vec<JsonValue>> {
        self.schema.require(field)?;
        let values = distinct_present(rows.iter().map(|row| row.raw(field)));
        Ok(values.into_iter().cloned().collect())
    }
}

fn compare_optional(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.sort_cmp(b),
        (Some(a), None) => a.sort_cmp(&FieldValue::Null),
        (None, Some(b)) => FieldValue::Null.sort_cmp(b),
        (None, None) => Ordering::Equal,
    }
}

/// Return `rows[offset .. offset + limit]`.
///
/// `offset` defaults to 0 and `limit` to the rest of the sequence. Bounds
/// past the end clamp instead of failing. An explicit `limit` of 0 is an
/// empty page, not "no limit"; omit `limit` to take the rest.
pub fn paginate<T>(rows: Vec<T>, limit: Option<usize>, offset: Option<usize>) -> Vec<T> {
    rows.into_iter()
        .skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
