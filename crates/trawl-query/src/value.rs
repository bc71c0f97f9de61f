use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A constant value a predicate compares a field against.
///
/// Datetimes come in two flavours: `Date` is timezone-less and treated as UTC
/// on the wire, `DateTz` carries its offset through serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDateTime),
    DateTz(DateTime<FixedOffset>),
    Id(Uuid),
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self {
        Self::Date(v)
    }
}

impl From<DateTime<FixedOffset>> for Scalar {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::DateTz(v)
    }
}

impl From<Uuid> for Scalar {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

/// A single-value operand: a literal, or a reference to a named binding
/// supplied alongside the predicate at compile time. Nothing else is
/// representable; there is no arbitrary expression evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueExpr {
    Lit(Scalar),
    Var(String),
}

impl ValueExpr {
    pub fn lit(value: impl Into<Scalar>) -> Self {
        Self::Lit(value.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }
}

/// A collection operand for set-membership predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetExpr {
    Lit(Vec<Scalar>),
    Var(String),
}

impl SetExpr {
    pub fn lit<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        Self::Lit(values.into_iter().map(Into::into).collect())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }
}

/// A bound value a `Var` reference resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

/// Named values referenced by `Var` operands, supplied at compile time.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.values.insert(name.into(), Binding::Scalar(value.into()));
        self
    }

    pub fn bind_list<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Scalar>,
    {
        self.values.insert(
            name.into(),
            Binding::List(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.values.get(name) {
            Some(Binding::Scalar(v)) => Some(v),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[Scalar]> {
        match self.values.get(name) {
            Some(Binding::List(vs)) => Some(vs),
            _ => None,
        }
    }
}
