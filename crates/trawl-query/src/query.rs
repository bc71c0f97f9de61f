use serde::{Deserialize, Serialize};

use crate::path::FieldPath;
use crate::predicate::Predicate;
use crate::sort::{Sort, SortDirection};

/// Accumulates a filter, sort order, and pagination before compilation.
///
/// Successive [`filter`](Query::filter) calls AND their predicates together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub filter: Option<Predicate>,
    pub sort: Vec<Sort>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, field: impl Into<FieldPath>, direction: SortDirection) -> Self {
        self.sort.push(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn skip(mut self, n: usize) -> Self {
        self.skip = Some(n);
        self
    }

    pub fn take(mut self, n: usize) -> Self {
        self.take = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_accumulate_with_and() {
        let q = Query::new()
            .filter(Predicate::eq("Status", "active"))
            .filter(Predicate::flag("Verified"));
        assert!(matches!(q.filter, Some(Predicate::And(..))));
    }

    #[test]
    fn pagination_and_sort() {
        let q = Query::new()
            .order_by("Name", SortDirection::Asc)
            .skip(20)
            .take(10);
        assert_eq!(q.sort.len(), 1);
        assert_eq!(q.skip, Some(20));
        assert_eq!(q.take, Some(10));
    }
}
