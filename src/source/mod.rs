//! Data sources
//!
//! A [`DataSource`] supplies the raw record array every request starts from.
//! The service never caches what a source returns; each call to
//! [`DataSource::fetch`] is a fresh read.
//!
//! - [`HttpDataSource`]: GET a JSON document and extract its records
//! - [`StaticDataSource`]: a fixed in-memory record set

mod http;
mod memory;

pub use http::{extract_records, HttpDataSource};
pub use memory::StaticDataSource;

use crate::error::Result;
use crate::types::RawRecord;
use async_trait::async_trait;

/// Supplier of raw dataset records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the full record array
    async fn fetch(&self) -> Result<Vec<RawRecord>>;

    /// Short human-readable description, used in logs
    fn describe(&self) -> String;
}
