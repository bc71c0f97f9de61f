use std::sync::Arc;

use serde_json::Value;

use trawl_query::{Bindings, CompareOp, FieldPath, Predicate, Scalar, SetExpr, TextOp, ValueExpr};
use trawl_schema::{DocumentSchema, StorageKind};

use crate::dsl::RangeOp;
use crate::error::{CompileError, CompileWarning};
use crate::resolve::{FieldCache, FieldMeta, resolve_field};

/// One compiled atomic clause, created once per predicate leaf and consumed
/// exactly once by the emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Wire path relative to `nested_path` when one applies, exact suffix
    /// already applied where the operation calls for it.
    pub path: String,
    pub nested_path: Option<String>,
    pub kind: ConditionKind,
    /// Emitted inside a must-not combinator.
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionKind {
    Term(Value),
    Range { op: RangeOp, value: Value },
    Match(String),
    MatchPhrasePrefix(String),
    Wildcard(String),
    Terms(Vec<Value>),
}

/// Serialize a scalar to its wire form: all numerics as 64-bit floats,
/// datetimes as ISO-8601 with millisecond precision (offset-bearing only for
/// tz-aware values), identifiers as canonical strings.
pub(crate) fn wire_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Int(i) => Value::from(*i as f64),
        Scalar::Float(f) => Value::from(*f),
        Scalar::Str(s) => Value::from(s.as_str()),
        Scalar::Date(d) => Value::from(d.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()),
        Scalar::DateTz(d) => Value::from(d.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()),
        Scalar::Id(id) => Value::from(id.to_string()),
    }
}

fn scalar_kind(scalar: &Scalar) -> &'static str {
    match scalar {
        Scalar::Null => "null",
        Scalar::Bool(_) => "boolean",
        Scalar::Int(_) => "integer",
        Scalar::Float(_) => "float",
        Scalar::Str(_) => "string",
        Scalar::Date(_) | Scalar::DateTz(_) => "date",
        Scalar::Id(_) => "identifier",
    }
}

/// Turns predicate leaves into [`Condition`]s, accumulating warnings for the
/// leaves it drops.
pub(crate) struct Classifier<'a> {
    schema: &'a DocumentSchema,
    cache: &'a FieldCache,
    bindings: &'a Bindings,
    pub warnings: Vec<CompileWarning>,
}

impl<'a> Classifier<'a> {
    pub fn new(schema: &'a DocumentSchema, cache: &'a FieldCache, bindings: &'a Bindings) -> Self {
        Self {
            schema,
            cache,
            bindings,
            warnings: Vec::new(),
        }
    }

    /// Classify one leaf. `Ok(None)` means the leaf was dropped with a
    /// warning and contributes nothing to the query.
    pub fn classify(&mut self, leaf: &Predicate) -> Result<Option<Condition>, CompileError> {
        match leaf {
            Predicate::Compare { field, op, value } => self.classify_compare(field, *op, value),
            Predicate::Text { field, op, value } => self.classify_text(field, *op, value),
            Predicate::In { field, values } => self.classify_in(field, values),
            // A bare boolean reference is sugar for `field == true`; boolean
            // fields never take the exact suffix, which Eq classification
            // already guarantees.
            Predicate::Flag(field) => {
                self.classify_compare(field, CompareOp::Eq, &ValueExpr::Lit(Scalar::Bool(true)))
            }
            Predicate::And(..) | Predicate::Or(..) => {
                unreachable!("combinators are handled by the normalizer")
            }
        }
    }

    fn resolve(&mut self, field: &FieldPath) -> Option<Arc<FieldMeta>> {
        if field.is_empty() {
            self.warnings.push(CompileWarning::EmptyFieldPath);
            return None;
        }
        match resolve_field(self.schema, self.cache, field) {
            Some(meta) => Some(meta),
            None => {
                self.warnings
                    .push(CompileWarning::UnresolvedField(field.to_string()));
                None
            }
        }
    }

    fn scalar(&self, value: &ValueExpr) -> Result<Scalar, CompileError> {
        match value {
            ValueExpr::Lit(scalar) => Ok(scalar.clone()),
            ValueExpr::Var(name) => self
                .bindings
                .scalar(name)
                .cloned()
                .ok_or_else(|| CompileError::UnboundVariable(name.clone())),
        }
    }

    fn classify_compare(
        &mut self,
        field: &FieldPath,
        op: CompareOp,
        value: &ValueExpr,
    ) -> Result<Option<Condition>, CompileError> {
        let Some(meta) = self.resolve(field) else {
            return Ok(None);
        };
        let scalar = self.scalar(value)?;

        let condition = match op {
            CompareOp::Eq | CompareOp::Ne => Condition {
                path: meta.exact_target(),
                nested_path: meta.nested_path.clone(),
                kind: ConditionKind::Term(wire_value(&scalar)),
                negated: op == CompareOp::Ne,
            },
            CompareOp::Gt | CompareOp::Gte | CompareOp::Lt | CompareOp::Lte => {
                let op = match op {
                    CompareOp::Gt => RangeOp::Gt,
                    CompareOp::Gte => RangeOp::Gte,
                    CompareOp::Lt => RangeOp::Lt,
                    CompareOp::Lte => RangeOp::Lte,
                    _ => unreachable!(),
                };
                // Numeric and date values range directly; text ranges run
                // against the exact sub-field; nothing else is orderable.
                let path = match &scalar {
                    Scalar::Int(_) | Scalar::Float(_) | Scalar::Date(_) | Scalar::DateTz(_) => {
                        meta.path.clone()
                    }
                    Scalar::Str(_) => meta.exact_target(),
                    other => {
                        return Err(CompileError::UnsupportedRangeType {
                            field: field.to_string(),
                            kind: scalar_kind(other),
                        });
                    }
                };
                Condition {
                    path,
                    nested_path: meta.nested_path.clone(),
                    kind: ConditionKind::Range {
                        op,
                        value: wire_value(&scalar),
                    },
                    negated: false,
                }
            }
        };
        Ok(Some(condition))
    }

    fn classify_text(
        &mut self,
        field: &FieldPath,
        op: TextOp,
        value: &ValueExpr,
    ) -> Result<Option<Condition>, CompileError> {
        let Some(meta) = self.resolve(field) else {
            return Ok(None);
        };
        let Scalar::Str(text) = self.scalar(value)? else {
            self.warnings.push(CompileWarning::UnsupportedPredicate {
                field: field.to_string(),
                reason: "text operation on a non-string value".to_string(),
            });
            return Ok(None);
        };

        let condition = match meta.kind {
            // Keyword fields have no analyzer; anchor the literal.
            StorageKind::Keyword => Condition {
                path: meta.path.clone(),
                nested_path: meta.nested_path.clone(),
                kind: ConditionKind::Wildcard(anchor(op, &text)),
                negated: false,
            },
            StorageKind::Text => match op {
                TextOp::Contains => Condition {
                    path: meta.path.clone(),
                    nested_path: meta.nested_path.clone(),
                    kind: ConditionKind::Match(text),
                    negated: false,
                },
                TextOp::StartsWith => Condition {
                    path: meta.path.clone(),
                    nested_path: meta.nested_path.clone(),
                    kind: ConditionKind::MatchPhrasePrefix(text),
                    negated: false,
                },
                // The engine has no native ends-with on analyzed text, so
                // this degrades to a wildcard on the exact sub-field.
                TextOp::EndsWith => Condition {
                    path: meta.exact_target(),
                    nested_path: meta.nested_path.clone(),
                    kind: ConditionKind::Wildcard(format!("*{text}")),
                    negated: false,
                },
            },
            _ => {
                self.warnings.push(CompileWarning::UnsupportedPredicate {
                    field: field.to_string(),
                    reason: "text operation on a non-string field".to_string(),
                });
                return Ok(None);
            }
        };
        Ok(Some(condition))
    }

    fn classify_in(
        &mut self,
        field: &FieldPath,
        values: &SetExpr,
    ) -> Result<Option<Condition>, CompileError> {
        let Some(meta) = self.resolve(field) else {
            return Ok(None);
        };
        let scalars: Vec<Scalar> = match values {
            SetExpr::Lit(vs) => vs.clone(),
            SetExpr::Var(name) => self
                .bindings
                .list(name)
                .map(<[Scalar]>::to_vec)
                .ok_or_else(|| CompileError::UnboundVariable(name.clone()))?,
        };
        // An empty list still emits a terms clause: `terms` with no values
        // matches nothing, which is the required meaning. Dropping the clause
        // would silently turn "in []" into "always true".
        Ok(Some(Condition {
            path: meta.exact_target(),
            nested_path: meta.nested_path.clone(),
            kind: ConditionKind::Terms(scalars.iter().map(wire_value).collect()),
            negated: false,
        }))
    }
}

fn anchor(op: TextOp, text: &str) -> String {
    match op {
        TextOp::Contains => format!("*{text}*"),
        TextOp::StartsWith => format!("{text}*"),
        TextOp::EndsWith => format!("*{text}"),
    }
}
