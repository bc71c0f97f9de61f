use trawl_query::Predicate;

use crate::classify::{Classifier, Condition};
use crate::error::CompileError;

/// A flat conjunction of atomic conditions. Order carries no meaning but is
/// preserved for deterministic output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AndGroup {
    pub conditions: Vec<Condition>,
}

/// Disjunctive normal form: the outer list is OR, each group is AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dnf {
    pub groups: Vec<AndGroup>,
}

/// Rewrite a predicate tree into disjunctive normal form.
///
/// OR concatenates group lists; AND distributes as a cross-product, so
/// `(a||b)&&(c||d)` expands to four groups. The group count is multiplicative
/// in the OR branches at each level: fine for hand-written predicates, a
/// real scaling limit for generated ones.
///
/// A leaf that fails to classify contributes an empty sub-expression, which
/// is the identity under both combinators: it drops out of an AND and adds no
/// branch to an OR. It is never "always true".
pub(crate) fn to_dnf(
    classifier: &mut Classifier<'_>,
    predicate: &Predicate,
) -> Result<Dnf, CompileError> {
    match predicate {
        Predicate::And(l, r) => {
            let left = to_dnf(classifier, l)?;
            let right = to_dnf(classifier, r)?;
            if left.groups.is_empty() {
                return Ok(right);
            }
            if right.groups.is_empty() {
                return Ok(left);
            }
            let mut groups = Vec::with_capacity(left.groups.len() * right.groups.len());
            for lg in &left.groups {
                for rg in &right.groups {
                    let mut conditions = lg.conditions.clone();
                    conditions.extend(rg.conditions.iter().cloned());
                    groups.push(AndGroup { conditions });
                }
            }
            Ok(Dnf { groups })
        }
        Predicate::Or(l, r) => {
            let mut dnf = to_dnf(classifier, l)?;
            dnf.groups.extend(to_dnf(classifier, r)?.groups);
            Ok(dnf)
        }
        leaf => Ok(match classifier.classify(leaf)? {
            Some(condition) => Dnf {
                groups: vec![AndGroup {
                    conditions: vec![condition],
                }],
            },
            None => Dnf::default(),
        }),
    }
}
