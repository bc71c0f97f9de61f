use std::collections::HashSet;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use trawl_query::{Bindings, Query};
use trawl_schema::DocumentSchema;
use trawl_search::{Compiler, FieldCache};

use crate::error::ClientError;
use crate::request::SearchRequest;
use crate::transport::{SearchResponse, SearchTransport};

/// A typed view over one document type's index.
///
/// Compiles queries against the schema, keeps the field-metadata cache warm
/// across calls, runs the create-if-missing index check at most once, and
/// forwards documents to the transport.
pub struct Collection<'a, T: SearchTransport> {
    schema: &'a DocumentSchema,
    transport: &'a T,
    cache: FieldCache,
    ensured: Mutex<HashSet<String>>,
}

impl<'a, T: SearchTransport> Collection<'a, T> {
    pub fn new(schema: &'a DocumentSchema, transport: &'a T) -> Self {
        Self {
            schema,
            transport,
            cache: FieldCache::new(),
            ensured: Mutex::new(HashSet::new()),
        }
    }

    pub fn index_name(&self) -> String {
        self.schema.index_name()
    }

    /// Create the index if missing. Idempotent; the existence check runs at
    /// most once per collection instance.
    pub fn ensure_index(&self, mapping: &Value) -> Result<(), ClientError> {
        let name = self.schema.index_name();
        if self.ensured.lock().unwrap().contains(&name) {
            return Ok(());
        }
        if !self.transport.index_exists(&name)? {
            debug!(index = %name, "creating index");
            self.transport.create_index(&name, mapping)?;
        }
        self.ensured.lock().unwrap().insert(name);
        Ok(())
    }

    /// Compile and execute a query. Total-hit tracking is always requested;
    /// dropped predicate leaves are logged before the request goes out.
    pub fn find(&self, query: &Query, bindings: &Bindings) -> Result<SearchResponse, ClientError> {
        let compiler = Compiler::new(self.schema, &self.cache);
        let compiled = compiler.compile(query, bindings)?;
        for warning in &compiled.warnings {
            tracing::warn!(%warning, index = %self.schema.index_name(), "dropped predicate leaf");
        }
        let request = SearchRequest::new(self.schema.index_name(), compiled).track_total_hits();
        debug!(index = %request.index, "search");
        self.transport.search(&request)
    }

    pub fn put(&self, id: &str, document: &Value) -> Result<(), ClientError> {
        self.transport
            .put_document(&self.schema.index_name(), id, document)
    }

    pub fn put_many(&self, documents: &[(String, Value)]) -> Result<(), ClientError> {
        self.transport.bulk_put(&self.schema.index_name(), documents)
    }
}
