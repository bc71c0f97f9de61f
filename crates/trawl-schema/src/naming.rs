use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Wire-name derivation applied to source field names that carry no explicit
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Source names pass through unchanged.
    Preserve,
    /// `OrderDate` → `orderDate`.
    CamelCase,
    /// `OrderDate` → `order_date`.
    SnakeCase,
}

impl NamingConvention {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::CamelCase => name.to_case(Case::Camel),
            Self::SnakeCase => name.to_case(Case::Snake),
        }
    }
}
