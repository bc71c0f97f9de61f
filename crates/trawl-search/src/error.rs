use std::fmt;

/// Compile-time failure. A failed compile never reaches the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Range comparison against a value that is neither numeric, date-like,
    /// nor textual.
    UnsupportedRangeType { field: String, kind: &'static str },
    /// A `Var` operand with no entry in the supplied bindings.
    UnboundVariable(String),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnsupportedRangeType { field, kind } => {
                write!(f, "range comparison on {field} against unsupported {kind} value")
            }
            CompileError::UnboundVariable(name) => write!(f, "unbound variable: {name}"),
        }
    }
}

impl std::error::Error for CompileError {}

/// A leaf the compiler dropped instead of failing on.
///
/// A dropped leaf contributes nothing to the compiled query, which widens the
/// result set; call sites should surface these rather than ignore them.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileWarning {
    /// The field path was empty after resolution; the condition was dropped.
    EmptyFieldPath,
    /// The field path did not resolve to a queryable leaf.
    UnresolvedField(String),
    /// The predicate shape is not supported for the resolved field.
    UnsupportedPredicate { field: String, reason: String },
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileWarning::EmptyFieldPath => write!(f, "empty field path, condition dropped"),
            CompileWarning::UnresolvedField(path) => {
                write!(f, "field {path} did not resolve, condition dropped")
            }
            CompileWarning::UnsupportedPredicate { field, reason } => {
                write!(f, "unsupported predicate on {field}: {reason}, condition dropped")
            }
        }
    }
}
