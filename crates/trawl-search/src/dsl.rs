use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl RangeOp {
    /// Key of this bound inside a range clause body.
    pub fn key(self) -> &'static str {
        match self {
            RangeOp::Gt => "gt",
            RangeOp::Gte => "gte",
            RangeOp::Lt => "lt",
            RangeOp::Lte => "lte",
        }
    }
}

/// One clause of the engine's composite query DSL.
///
/// This is the exact vocabulary the engine executes; [`to_json`]
/// (QueryNode::to_json) produces the request-body form handed to the
/// transport unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    Term {
        field: String,
        value: Value,
    },
    Range {
        field: String,
        op: RangeOp,
        value: Value,
    },
    Match {
        field: String,
        query: String,
    },
    MatchPhrasePrefix {
        field: String,
        query: String,
    },
    Wildcard {
        field: String,
        pattern: String,
    },
    Terms {
        field: String,
        values: Vec<Value>,
    },
    Bool {
        must: Vec<QueryNode>,
        should: Vec<QueryNode>,
        must_not: Vec<QueryNode>,
    },
    Nested {
        path: String,
        query: Box<QueryNode>,
    },
    MatchAll,
    MatchNone,
}

impl QueryNode {
    pub fn bool_must(clauses: Vec<QueryNode>) -> QueryNode {
        QueryNode::Bool {
            must: clauses,
            should: Vec::new(),
            must_not: Vec::new(),
        }
    }

    pub fn bool_should(clauses: Vec<QueryNode>) -> QueryNode {
        QueryNode::Bool {
            must: Vec::new(),
            should: clauses,
            must_not: Vec::new(),
        }
    }

    pub fn bool_must_not(clauses: Vec<QueryNode>) -> QueryNode {
        QueryNode::Bool {
            must: Vec::new(),
            should: Vec::new(),
            must_not: clauses,
        }
    }

    /// Serialize to the engine's JSON query DSL.
    pub fn to_json(&self) -> Value {
        match self {
            QueryNode::Term { field, value } => {
                keyed("term", field, json!({ "value": value }))
            }
            QueryNode::Range { field, op, value } => {
                let mut bounds = Map::new();
                bounds.insert(op.key().to_string(), value.clone());
                keyed("range", field, Value::Object(bounds))
            }
            QueryNode::Match { field, query } => {
                keyed("match", field, json!({ "query": query }))
            }
            QueryNode::MatchPhrasePrefix { field, query } => {
                keyed("match_phrase_prefix", field, json!({ "query": query }))
            }
            QueryNode::Wildcard { field, pattern } => {
                keyed("wildcard", field, json!({ "value": pattern }))
            }
            QueryNode::Terms { field, values } => {
                keyed("terms", field, Value::Array(values.clone()))
            }
            QueryNode::Bool {
                must,
                should,
                must_not,
            } => {
                let mut body = Map::new();
                for (key, clauses) in [("must", must), ("should", should), ("must_not", must_not)] {
                    if !clauses.is_empty() {
                        body.insert(
                            key.to_string(),
                            Value::Array(clauses.iter().map(QueryNode::to_json).collect()),
                        );
                    }
                }
                json!({ "bool": body })
            }
            QueryNode::Nested { path, query } => {
                json!({ "nested": { "path": path, "query": query.to_json() } })
            }
            QueryNode::MatchAll => json!({ "match_all": {} }),
            QueryNode::MatchNone => json!({ "match_none": {} }),
        }
    }
}

/// Build `{ outer: { field: body } }`, the shape shared by the field-keyed
/// clause kinds.
fn keyed(outer: &str, field: &str, body: Value) -> Value {
    let mut inner = Map::new();
    inner.insert(field.to_string(), body);
    let mut object = Map::new();
    object.insert(outer.to_string(), Value::Object(inner));
    Value::Object(object)
}

impl Serialize for QueryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_shape() {
        let node = QueryNode::Term {
            field: "status".into(),
            value: json!("active"),
        };
        assert_eq!(node.to_json(), json!({ "term": { "status": { "value": "active" } } }));
    }

    #[test]
    fn range_shape() {
        let node = QueryNode::Range {
            field: "revenue".into(),
            op: RangeOp::Gte,
            value: json!(1000.0),
        };
        assert_eq!(node.to_json(), json!({ "range": { "revenue": { "gte": 1000.0 } } }));
    }

    #[test]
    fn bool_omits_empty_clause_lists() {
        let node = QueryNode::bool_must(vec![QueryNode::MatchAll]);
        assert_eq!(node.to_json(), json!({ "bool": { "must": [{ "match_all": {} }] } }));
    }

    #[test]
    fn nested_wraps_inner_query() {
        let node = QueryNode::Nested {
            path: "address".into(),
            query: Box::new(QueryNode::Term {
                field: "address.city.keyword".into(),
                value: json!("Beijing"),
            }),
        };
        assert_eq!(
            node.to_json(),
            json!({
                "nested": {
                    "path": "address",
                    "query": { "term": { "address.city.keyword": { "value": "Beijing" } } }
                }
            })
        );
    }

    #[test]
    fn terms_shape_keeps_values_inline() {
        let node = QueryNode::Terms {
            field: "status".into(),
            values: vec![json!("a"), json!("b")],
        };
        assert_eq!(node.to_json(), json!({ "terms": { "status": ["a", "b"] } }));
    }
}
