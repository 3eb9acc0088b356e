//! Record normalization
//!
//! Re-keys raw records from display names to normalized names and attaches
//! a typed [`FieldValue`](crate::value::FieldValue) to every field.

mod record;

pub use record::{normalize, normalize_all, Cell, NormalizedRecord};
