use trawl_query::{Bindings, Predicate, Query, Sort, SortDirection};
use trawl_schema::DocumentSchema;

use crate::classify::{Classifier, Condition, ConditionKind};
use crate::dnf::{AndGroup, Dnf, to_dnf};
use crate::dsl::QueryNode;
use crate::error::{CompileError, CompileWarning};
use crate::resolve::{FieldCache, exact_path, resolve_field};

/// Compiles predicates and sorts against one document schema.
///
/// Pure and synchronous; the only shared state is the field-metadata cache,
/// which is safe under concurrent use.
pub struct Compiler<'a> {
    schema: &'a DocumentSchema,
    cache: &'a FieldCache,
}

/// A compiled predicate plus the leaves the compiler dropped along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub query: QueryNode,
    pub warnings: Vec<CompileWarning>,
}

/// One resolved sort entry: full wire path with the exact suffix already
/// applied where the storage kind requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

/// A fully compiled query: clause tree, resolved sort, and pagination, ready
/// to hand to the execution collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub query: QueryNode,
    pub sort: Vec<SortField>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
    pub warnings: Vec<CompileWarning>,
}

impl<'a> Compiler<'a> {
    pub fn new(schema: &'a DocumentSchema, cache: &'a FieldCache) -> Self {
        Self { schema, cache }
    }

    /// Compile one predicate into a single composite clause.
    pub fn compile_predicate(
        &self,
        predicate: &Predicate,
        bindings: &Bindings,
    ) -> Result<Compiled, CompileError> {
        let mut classifier = Classifier::new(self.schema, self.cache, bindings);
        let dnf = to_dnf(&mut classifier, predicate)?;
        Ok(Compiled {
            query: emit(&dnf),
            warnings: classifier.warnings,
        })
    }

    /// Normalize a predicate without emitting, exposing the OR-of-AND-groups
    /// structure. Useful for inspection and equivalence testing.
    pub fn normalize(
        &self,
        predicate: &Predicate,
        bindings: &Bindings,
    ) -> Result<(Dnf, Vec<CompileWarning>), CompileError> {
        let mut classifier = Classifier::new(self.schema, self.cache, bindings);
        let dnf = to_dnf(&mut classifier, predicate)?;
        Ok((dnf, classifier.warnings))
    }

    /// Resolve one sort entry. Analyzed text sorts on its exact sub-field;
    /// everything else sorts on itself. Nested membership is not specially
    /// handled for sort.
    pub fn resolve_sort(&self, sort: &Sort) -> Option<SortField> {
        let meta = resolve_field(self.schema, self.cache, &sort.field)?;
        let field = if meta.exact {
            exact_path(&meta.full_path())
        } else {
            meta.full_path()
        };
        Some(SortField {
            field,
            direction: sort.direction,
        })
    }

    /// Compile a whole accumulated query. An absent filter matches everything;
    /// unresolvable sort fields are dropped with a warning.
    pub fn compile(&self, query: &Query, bindings: &Bindings) -> Result<CompiledQuery, CompileError> {
        let (node, mut warnings) = match &query.filter {
            Some(predicate) => {
                let compiled = self.compile_predicate(predicate, bindings)?;
                (compiled.query, compiled.warnings)
            }
            None => (QueryNode::MatchAll, Vec::new()),
        };

        let mut sort = Vec::new();
        for entry in &query.sort {
            match self.resolve_sort(entry) {
                Some(field) => sort.push(field),
                None => warnings.push(CompileWarning::UnresolvedField(entry.field.to_string())),
            }
        }

        Ok(CompiledQuery {
            query: node,
            sort,
            skip: query.skip,
            take: query.take,
            warnings,
        })
    }
}

fn emit(dnf: &Dnf) -> QueryNode {
    match dnf.groups.as_slice() {
        [] => QueryNode::MatchNone,
        [group] => emit_group(group),
        groups => QueryNode::bool_should(groups.iter().map(emit_group).collect()),
    }
}

/// Compile one AND-group.
///
/// Conditions sharing a nested path are merged into ONE nested clause: each
/// nested clause evaluates against a single sub-document instance, so
/// splitting a conjunction across two of them would change "one sub-document
/// satisfies all conditions" into "each condition is satisfied somewhere".
fn emit_group(group: &AndGroup) -> QueryNode {
    // Bucket nested conditions by path, preserving first-appearance order.
    let mut buckets: Vec<(&str, Vec<&Condition>)> = Vec::new();
    for condition in &group.conditions {
        if let Some(path) = condition.nested_path.as_deref() {
            match buckets.iter_mut().find(|(p, _)| *p == path) {
                Some((_, bucket)) => bucket.push(condition),
                None => buckets.push((path, vec![condition])),
            }
        }
    }

    let mut clauses = Vec::new();
    let mut emitted: Vec<&str> = Vec::new();
    for condition in &group.conditions {
        match condition.nested_path.as_deref() {
            None => clauses.push(emit_condition(condition, None)),
            Some(path) => {
                if emitted.contains(&path) {
                    continue;
                }
                emitted.push(path);
                let (_, bucket) = buckets.iter().find(|(p, _)| *p == path).unwrap();
                clauses.push(emit_nested(path, bucket));
            }
        }
    }

    if clauses.len() == 1 {
        clauses.pop().unwrap()
    } else {
        QueryNode::bool_must(clauses)
    }
}

fn emit_nested(path: &str, bucket: &[&Condition]) -> QueryNode {
    // The engine requires fully qualified field paths inside nested queries
    // even though resolution tracked them relative to the scope.
    let inner = match bucket {
        [single] => emit_condition(single, Some(path)),
        many => QueryNode::bool_must(
            many.iter()
                .map(|condition| emit_condition(condition, Some(path)))
                .collect(),
        ),
    };
    QueryNode::Nested {
        path: path.to_string(),
        query: Box::new(inner),
    }
}

fn emit_condition(condition: &Condition, nested_scope: Option<&str>) -> QueryNode {
    let field = match nested_scope {
        Some(path) => format!("{path}.{}", condition.path),
        None => condition.path.clone(),
    };
    let node = match &condition.kind {
        ConditionKind::Term(value) => QueryNode::Term {
            field,
            value: value.clone(),
        },
        ConditionKind::Range { op, value } => QueryNode::Range {
            field,
            op: *op,
            value: value.clone(),
        },
        ConditionKind::Match(query) => QueryNode::Match {
            field,
            query: query.clone(),
        },
        ConditionKind::MatchPhrasePrefix(query) => QueryNode::MatchPhrasePrefix {
            field,
            query: query.clone(),
        },
        ConditionKind::Wildcard(pattern) => QueryNode::Wildcard {
            field,
            pattern: pattern.clone(),
        },
        ConditionKind::Terms(values) => QueryNode::Terms {
            field,
            values: values.clone(),
        },
    };
    if condition.negated {
        QueryNode::bool_must_not(vec![node])
    } else {
        node
    }
}
