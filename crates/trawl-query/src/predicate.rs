use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::value::{Scalar, SetExpr, ValueExpr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOp {
    Contains,
    StartsWith,
    EndsWith,
}

/// A boolean predicate over a document's fields.
///
/// Built by callers through the constructor helpers and combined with
/// [`and`](Predicate::and) / [`or`](Predicate::or); the compiler consumes the
/// tree by exhaustive match, so a new node kind cannot be added without a
/// corresponding compiler case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Compare {
        field: FieldPath,
        op: CompareOp,
        value: ValueExpr,
    },
    Text {
        field: FieldPath,
        op: TextOp,
        value: ValueExpr,
    },
    In {
        field: FieldPath,
        values: SetExpr,
    },
    /// A bare boolean field reference, shorthand for `field == true`.
    Flag(FieldPath),
}

impl Predicate {
    // ── Combinators ─────────────────────────────────────────────

    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }

    // ── Comparisons ─────────────────────────────────────────────

    pub fn compare(field: impl Into<FieldPath>, op: CompareOp, value: ValueExpr) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn eq(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Eq, ValueExpr::lit(value))
    }

    pub fn ne(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Ne, ValueExpr::lit(value))
    }

    pub fn gt(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Gt, ValueExpr::lit(value))
    }

    pub fn gte(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Gte, ValueExpr::lit(value))
    }

    pub fn lt(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Lt, ValueExpr::lit(value))
    }

    pub fn lte(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::compare(field, CompareOp::Lte, ValueExpr::lit(value))
    }

    // ── Text operations ─────────────────────────────────────────

    pub fn text(field: impl Into<FieldPath>, op: TextOp, value: ValueExpr) -> Self {
        Self::Text {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn contains(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::text(field, TextOp::Contains, ValueExpr::lit(value))
    }

    pub fn starts_with(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::text(field, TextOp::StartsWith, ValueExpr::lit(value))
    }

    pub fn ends_with(field: impl Into<FieldPath>, value: impl Into<Scalar>) -> Self {
        Self::text(field, TextOp::EndsWith, ValueExpr::lit(value))
    }

    // ── Membership / flags ──────────────────────────────────────

    pub fn is_in<I>(field: impl Into<FieldPath>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        Self::In {
            field: field.into(),
            values: SetExpr::lit(values),
        }
    }

    pub fn in_var(field: impl Into<FieldPath>, name: impl Into<String>) -> Self {
        Self::In {
            field: field.into(),
            values: SetExpr::var(name),
        }
    }

    pub fn flag(field: impl Into<FieldPath>) -> Self {
        Self::Flag(field.into())
    }
}
