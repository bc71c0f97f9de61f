use serde_json::{Map, Value, json};

use trawl_query::SortDirection;
use trawl_search::{CompiledQuery, QueryNode, SortField};

/// One executable search call: everything the transport needs to run a
/// compiled query against an index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: String,
    pub query: QueryNode,
    pub sort: Vec<SortField>,
    pub from: Option<usize>,
    pub size: Option<usize>,
    pub track_total_hits: bool,
}

impl SearchRequest {
    pub fn new(index: impl Into<String>, compiled: CompiledQuery) -> Self {
        Self {
            index: index.into(),
            query: compiled.query,
            sort: compiled.sort,
            from: compiled.skip,
            size: compiled.take,
            track_total_hits: false,
        }
    }

    pub fn track_total_hits(mut self) -> Self {
        self.track_total_hits = true;
        self
    }

    /// The JSON body for the engine's search endpoint.
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), self.query.to_json());
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(sort_entry).collect()),
            );
        }
        if let Some(from) = self.from {
            body.insert("from".to_string(), Value::from(from));
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), Value::from(size));
        }
        if self.track_total_hits {
            body.insert("track_total_hits".to_string(), Value::Bool(true));
        }
        Value::Object(body)
    }
}

fn sort_entry(sort: &SortField) -> Value {
    let order = match sort.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    let mut entry = Map::new();
    entry.insert(sort.field.clone(), json!({ "order": order }));
    Value::Object(entry)
}
