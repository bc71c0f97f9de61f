use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use trawl_query::FieldPath;
use trawl_schema::{DocumentSchema, FieldDescriptor, StorageKind};

/// Suffix of the derived exact sub-field carried by analyzed text fields.
pub const EXACT_SUFFIX: &str = ".keyword";

/// Append the exact sub-field suffix to a wire path. Idempotent: the suffix
/// is appended at most once.
pub fn exact_path(path: &str) -> String {
    if path.ends_with(EXACT_SUFFIX) {
        path.to_string()
    } else {
        format!("{path}{EXACT_SUFFIX}")
    }
}

/// Resolved description of one field access.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMeta {
    /// Wire path, relative to `nested_path` when one applies.
    pub path: String,
    /// Wire name of the enclosing nested sub-document, when the access
    /// resolves into one.
    pub nested_path: Option<String>,
    pub kind: StorageKind,
    /// Exact and sort operations must target the derived exact sub-field.
    pub exact: bool,
}

impl FieldMeta {
    /// The relative path exact-match operations should target.
    pub fn exact_target(&self) -> String {
        if self.exact {
            exact_path(&self.path)
        } else {
            self.path.clone()
        }
    }

    /// Fully qualified wire path including the nested scope.
    pub fn full_path(&self) -> String {
        match &self.nested_path {
            Some(scope) => format!("{scope}.{}", self.path),
            None => self.path.clone(),
        }
    }
}

/// Read-mostly cache of resolved field metadata, keyed by document type and
/// access path.
///
/// Population is compute-or-fetch with last-writer-wins: resolution is
/// deterministic per key, so racing writers store equal values and no lock is
/// held around the compile path.
pub struct FieldCache {
    entries: ArcSwap<HashMap<(String, String), Arc<FieldMeta>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    fn get(&self, key: &(String, String)) -> Option<Arc<FieldMeta>> {
        self.entries.load().get(key).cloned()
    }

    fn insert(&self, key: (String, String), meta: Arc<FieldMeta>) {
        let mut next = (**self.entries.load()).clone();
        next.insert(key, meta);
        self.entries.store(Arc::new(next));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.load().len()
    }
}

impl Default for FieldCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a field-access path against a schema, consulting the cache first.
///
/// Only the FIRST path segment is tested for nested scope: a chain whose
/// first hop is object-typed or explicitly flagged nested resolves into that
/// scope, while a deeper nested object (`a.b.c` where `b` is the nested type)
/// resolves as a plain dotted path. Collection-typed first hops are not
/// treated as nested unless flagged.
pub fn resolve_field(
    schema: &DocumentSchema,
    cache: &FieldCache,
    path: &FieldPath,
) -> Option<Arc<FieldMeta>> {
    if path.is_empty() {
        return None;
    }
    let key = (schema.name.clone(), path.to_string());
    if let Some(meta) = cache.get(&key) {
        return Some(meta);
    }
    let meta = Arc::new(compute(schema, path)?);
    cache.insert(key, meta.clone());
    Some(meta)
}

fn compute(schema: &DocumentSchema, path: &FieldPath) -> Option<FieldMeta> {
    let segments = path.segments();
    let first = schema.descriptor(&segments[0])?;

    let mut wire = vec![schema.wire_name(first)];
    let mut current: &FieldDescriptor = first;
    for segment in &segments[1..] {
        let table = current.ty.object_fields()?;
        current = table.iter().find(|d| d.name == *segment)?;
        wire.push(schema.wire_name(current));
    }

    let kind = current.ty.storage_kind()?;
    let exact = kind == StorageKind::Text && current.exact;

    let (nested_path, path) = if segments.len() > 1 && (first.ty.is_object() || first.nested) {
        (Some(wire[0].clone()), wire[1..].join("."))
    } else {
        (None, wire.join("."))
    };

    Some(FieldMeta {
        path,
        nested_path,
        kind,
        exact,
    })
}
