use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use serde_json::{Map, Value};

use trawl_client::{ClientError, Hit, SearchRequest, SearchResponse, SearchTransport};
use trawl_query::SortDirection;
use trawl_search::{QueryNode, RangeOp, SortField};

/// In-memory stand-in for the search engine: stores documents per index and
/// actually evaluates compiled queries, so compiler semantics, nested-scope
/// merging in particular, are observable end-to-end.
#[derive(Default)]
pub struct FakeEngine {
    indices: Mutex<HashMap<String, BTreeMap<String, Value>>>,
    pub exist_checks: AtomicUsize,
    pub created: AtomicUsize,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchTransport for FakeEngine {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ClientError> {
        let indices = self.indices.lock().unwrap();
        let docs = indices.get(&request.index).cloned().unwrap_or_default();
        drop(indices);

        let mut matched: Vec<(String, Value)> = docs
            .into_iter()
            .filter(|(_, doc)| eval(&request.query, doc))
            .collect();
        if !request.sort.is_empty() {
            matched.sort_by(|a, b| compare_docs(&a.1, &b.1, &request.sort));
        }

        let total = matched.len() as u64;
        let hits = matched
            .into_iter()
            .skip(request.from.unwrap_or(0))
            .take(request.size.unwrap_or(usize::MAX))
            .map(|(id, source)| Hit {
                id,
                source,
                score: None,
            })
            .collect();
        Ok(SearchResponse {
            hits,
            total: request.track_total_hits.then_some(total),
        })
    }

    fn index_exists(&self, index: &str) -> Result<bool, ClientError> {
        self.exist_checks.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self.indices.lock().unwrap().contains_key(index))
    }

    fn create_index(&self, index: &str, _mapping: &Value) -> Result<(), ClientError> {
        self.created.fetch_add(1, AtomicOrdering::SeqCst);
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default();
        Ok(())
    }

    fn put_document(&self, index: &str, id: &str, document: &Value) -> Result<(), ClientError> {
        self.indices
            .lock()
            .unwrap()
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document.clone());
        Ok(())
    }

    fn bulk_put(&self, index: &str, documents: &[(String, Value)]) -> Result<(), ClientError> {
        for (id, document) in documents {
            self.put_document(index, id, document)?;
        }
        Ok(())
    }
}

// ── Query evaluation ────────────────────────────────────────────

fn eval(node: &QueryNode, doc: &Value) -> bool {
    match node {
        QueryNode::Term { field, value } => {
            values_at(doc, field).iter().any(|v| value_eq(v, value))
        }
        QueryNode::Terms { field, values } => values_at(doc, field)
            .iter()
            .any(|v| values.iter().any(|candidate| value_eq(v, candidate))),
        QueryNode::Range { field, op, value } => values_at(doc, field)
            .iter()
            .any(|v| in_range(v, *op, value)),
        QueryNode::Match { field, query } => values_at(doc, field).iter().any(|v| {
            v.as_str()
                .is_some_and(|s| s.to_lowercase().contains(&query.to_lowercase()))
        }),
        QueryNode::MatchPhrasePrefix { field, query } => values_at(doc, field).iter().any(|v| {
            v.as_str()
                .is_some_and(|s| s.to_lowercase().starts_with(&query.to_lowercase()))
        }),
        QueryNode::Wildcard { field, pattern } => values_at(doc, field)
            .iter()
            .any(|v| v.as_str().is_some_and(|s| glob_match(pattern, s))),
        QueryNode::Bool {
            must,
            should,
            must_not,
        } => {
            must.iter().all(|clause| eval(clause, doc))
                && (should.is_empty() || should.iter().any(|clause| eval(clause, doc)))
                && must_not.iter().all(|clause| !eval(clause, doc))
        }
        // Each element is evaluated as its own scoped document, which is
        // exactly the cross-element isolation a nested clause provides.
        QueryNode::Nested { path, query } => values_at(doc, path)
            .iter()
            .any(|element| eval(query, &scoped(path, element))),
        QueryNode::MatchAll => true,
        QueryNode::MatchNone => false,
    }
}

/// All values reachable at a dotted wire path. Arrays fan out at every hop,
/// mirroring the engine's flattened view of non-nested object arrays. The
/// derived exact sub-field reads from its parent.
fn values_at<'v>(doc: &'v Value, path: &str) -> Vec<&'v Value> {
    let path = path.strip_suffix(".keyword").unwrap_or(path);
    let mut current = vec![doc];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => {
                    if let Some(v) = map.get(segment) {
                        next.push(v);
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        if let Value::Object(map) = item {
                            if let Some(v) = map.get(segment) {
                                next.push(v);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        current = next;
    }
    current
        .into_iter()
        .flat_map(|v| match v {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        })
        .collect()
}

/// Re-root one array element under its nested path so fully qualified inner
/// field paths resolve against it.
fn scoped(path: &str, element: &Value) -> Value {
    let mut value = element.clone();
    for segment in path.rsplit('.') {
        let mut map = Map::new();
        map.insert(segment.to_string(), value);
        value = Value::Object(map);
    }
    value
}

fn value_eq(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn in_range(value: &Value, op: RangeOp, bound: &Value) -> bool {
    if let (Some(v), Some(b)) = (value.as_f64(), bound.as_f64()) {
        return match op {
            RangeOp::Gt => v > b,
            RangeOp::Gte => v >= b,
            RangeOp::Lt => v < b,
            RangeOp::Lte => v <= b,
        };
    }
    if let (Some(v), Some(b)) = (value.as_str(), bound.as_str()) {
        return match op {
            RangeOp::Gt => v > b,
            RangeOp::Gte => v >= b,
            RangeOp::Lt => v < b,
            RangeOp::Lte => v <= b,
        };
    }
    false
}

fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let mut pos = 0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            continue;
        }
        if i == 0 {
            if !text.starts_with(part) {
                return false;
            }
            pos = part.len();
        } else if i == parts.len() - 1 && !pattern.ends_with('*') {
            return text.len() >= pos + part.len() && text.ends_with(part);
        } else {
            match text[pos..].find(part) {
                Some(found) => pos += found + part.len(),
                None => return false,
            }
        }
    }
    true
}

fn compare_docs(a: &Value, b: &Value, sort: &[SortField]) -> Ordering {
    for entry in sort {
        let av = values_at(a, &entry.field).first().copied();
        let bv = values_at(b, &entry.field).first().copied();
        let mut ord = compare_values(av, bv);
        if entry.direction == SortDirection::Desc {
            ord = ord.reverse();
        }
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
                x.cmp(y)
            } else {
                Ordering::Equal
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
