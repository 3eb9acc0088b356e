//! Field type inference from raw column values

use crate::types::{FieldType, JsonValue};
use crate::value::{
    as_boolean, distinct_present, is_date, is_integral, is_missing, is_plain_decimal, to_number,
};

/// Default upper bound on distinct values for an `OPTION` field
pub const DEFAULT_MAX_OPTIONS: usize = 10;

/// Type inferrer with configuration options
#[derive(Debug, Clone)]
pub struct TypeInferrer {
    /// Maximum distinct values for a field to be an `OPTION`
    max_options: usize,
    /// Detect date values
    detect_dates: bool,
}

impl Default for TypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInferrer {
    /// Create a new type inferrer with default settings
    pub fn new() -> Self {
        Self {
            max_options: DEFAULT_MAX_OPTIONS,
            detect_dates: true,
        }
    }

    /// Set the distinct-value limit for `OPTION` fields
    #[must_use]
    pub fn with_max_options(mut self, max_options: usize) -> Self {
        self.max_options = max_options;
        self
    }

    /// Enable/disable date detection
    #[must_use]
    pub fn with_date_detection(mut self, enabled: bool) -> Self {
        self.detect_dates = enabled;
        self
    }

    /// Distinct-value limit for `OPTION` fields
    pub fn max_options(&self) -> usize {
        self.max_options
    }

    /// Infer the type of a column.
    ///
    /// `None` entries stand for rows where the field is absent. Absent,
    /// null and empty-string values are ignored; a column with nothing
    /// else is `TEXT`.
    pub fn infer<'a, I>(&self, values: I) -> FieldType
    where
        I: IntoIterator<Item = Option<&'a JsonValue>>,
    {
        let present: Vec<&JsonValue> = values
            .into_iter()
            .filter(|v| !is_missing(*v))
            .flatten()
            .collect();

        if present.is_empty() {
            return FieldType::Text;
        }

        if present.iter().all(|v| as_boolean(v).is_some()) {
            return FieldType::Boolean;
        }

        if present
            .iter()
            .all(|v| to_number(v).is_some_and(is_integral))
        {
            return FieldType::Integer;
        }

        if present.iter().all(|v| is_plain_decimal(v)) {
            return FieldType::Float;
        }

        if self.detect_dates && present.iter().all(|v| is_date(v)) {
            return FieldType::Date;
        }

        if distinct_present(present.iter().copied().map(Some)).len() <= self.max_options {
            return FieldType::Option;
        }

        FieldType::Text
    }
}

/// Infer the type of a column of present values (convenience function)
pub fn infer_type(values: &[JsonValue]) -> FieldType {
    TypeInferrer::new().infer(values.iter().map(Some))
}
