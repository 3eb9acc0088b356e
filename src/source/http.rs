//! Remote JSON data source

use super::DataSource;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{JsonValue, RawRecord};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Data source that GETs a JSON document over HTTP
///
/// The document is either the record array itself or, when `records_path` is
/// set, a wrapper object holding it (`data.items`, `$.results[*]`, ...).
#[derive(Debug)]
pub struct HttpDataSource {
    client: HttpClient,
    url: String,
    records_path: Option<String>,
}

impl HttpDataSource {
    /// Create a source for `url` with a default client
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_client(HttpClient::new()?, url)
    }

    /// Create a source with an explicit client
    pub fn with_client(client: HttpClient, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        url::Url::parse(&url)?;
        Ok(Self {
            client,
            url,
            records_path: None,
        })
    }

    /// Create a source with a timeout and retry budget
    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self> {
        let config = HttpClientConfig::builder()
            .timeout(timeout)
            .max_retries(max_retries)
            .build();
        Self::with_client(HttpClient::with_config(config)?, url)
    }

    /// Read records from a path inside the response document
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.records_path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// Dataset URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Configured record path, if any
    pub fn records_path(&self) -> Option<&str> {
        self.records_path.as_deref()
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        debug!("Fetching dataset from {}", self.url);
        let document: JsonValue = self.client.get_json(&self.url).await?;

        let records = extract_records(document, self.records_path.as_deref())?;
        let records = into_records(records)?;

        info!("Fetched {} records from {}", records.len(), self.url);
        Ok(records)
    }

    fn describe(&self) -> String {
        match &self.records_path {
            Some(path) => format!("{} ({})", self.url, path),
            None => self.url.clone(),
        }
    }
}

/// Locate the record array inside a response document
///
/// Without a path the document itself must be the array. Simple dotted paths
/// with optional `[n]` indexing are walked directly; paths containing `*` go
/// through JSONPath.
pub fn extract_records(document: JsonValue, path: Option<&str>) -> Result<JsonValue> {
    let Some(path) = path else {
        return Ok(document);
    };

    if path.contains('*') && !path.contains("[-") {
        return find_with_jsonpath(&document, path);
    }

    walk_path(document, path).ok_or_else(|| Error::RecordExtraction {
        path: path.to_string(),
        message: "path not found in response".to_string(),
    })
}

/// Turn a JSON array of objects into raw records
pub(crate) fn into_records(value: JsonValue) -> Result<Vec<RawRecord>> {
    let JsonValue::Array(items) = value else {
        return Err(Error::data_source(format!(
            "expected a JSON array of records, got {}",
            kind_of(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            JsonValue::Object(map) => Ok(map),
            other => Err(Error::data_source(format!(
                "record {idx} is {}, expected an object",
                kind_of(&other)
            ))),
        })
        .collect()
}

fn find_with_jsonpath(document: &JsonValue, path: &str) -> Result<JsonValue> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::json_path(format!("{path}: {e}")))?;

    match jp.find(document) {
        JsonValue::Null => Ok(JsonValue::Array(Vec::new())),
        found @ JsonValue::Array(_) => Ok(found),
        other => Ok(JsonValue::Array(vec![other])),
    }
}

fn walk_path(document: JsonValue, path: &str) -> Option<JsonValue> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = document;

    for part in path.split('.').filter(|p| !p.is_empty() && *p != "$") {
        let (name, index) = match part.find('[') {
            Some(pos) => {
                let index = part[pos + 1..].strip_suffix(']')?.parse::<i64>().ok()?;
                (&part[..pos], Some(index))
            }
            None => (part, None),
        };

        if !name.is_empty() {
            current = take_key(current, name)?;
        }

        if let Some(index) = index {
            let JsonValue::Array(mut arr) = current else {
                return None;
            };
            let len = i64::try_from(arr.len()).ok()?;
            let idx = if index < 0 { len + index } else { index };
            let idx = usize::try_from(idx).ok().filter(|i| *i < arr.len())?;
            current = arr.swap_remove(idx);
        }
    }

    Some(current)
}

fn take_key(value: JsonValue, key: &str) -> Option<JsonValue> {
    match value {
        JsonValue::Object(mut map) => map.remove(key),
        _ => None,
    }
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
