use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::request::SearchRequest;

/// One document returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,
    pub source: Value,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<Hit>,
    /// Present when the request asked for total-hit tracking.
    pub total: Option<u64>,
}

/// The document-client seam.
///
/// Implementations own connections, retries, and the engine's HTTP surface;
/// this crate only shapes requests and hands them over. A compiled query
/// reaches the transport exactly as produced; no rewriting happens here.
pub trait SearchTransport {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError>;

    fn index_exists(&self, index: &str) -> Result<bool, ClientError>;

    /// Create an index with the given mapping body. Mapping generation is the
    /// caller's concern.
    fn create_index(&self, index: &str, mapping: &Value) -> Result<(), ClientError>;

    fn put_document(&self, index: &str, id: &str, document: &Value) -> Result<(), ClientError>;

    fn bulk_put(&self, index: &str, documents: &[(String, Value)]) -> Result<(), ClientError>;
}
