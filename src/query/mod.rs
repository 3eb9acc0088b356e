//! Query evaluation module
//!
//! Filtering, ordering, pagination and distinct-value extraction over
//! normalized records. Operations are pure and compose in the order
//! filter → sort → paginate.
//!
//! # Example
//!
//! ```rust
//! use dataset_query::query::{Condition, Query};
//!
//! let adults = Query::new().with("age", Condition::gte(18));
//! assert_eq!(adults.len(), 1);
//! ```

mod engine;
mod types;

pub use engine::{paginate, QueryEngine};
pub use types::{Comparison, Condition, Query};

#[cfg(test)]
mod tests;
