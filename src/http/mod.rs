//! HTTP client module
//!
//! Provides the HTTP client used by the remote data source.
//!
//! # Features
//!
//! - **Timeouts**: Every request is bounded by a configurable timeout
//! - **Optional Retries**: Exponential backoff on 429/5xx, timeouts and
//!   connection errors, disabled unless `max_retries > 0`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
