mod path;
mod predicate;
mod query;
mod sort;
mod value;

pub use path::FieldPath;
pub use predicate::{CompareOp, Predicate, TextOp};
pub use query::Query;
pub use sort::{Sort, SortDirection};
pub use value::{Binding, Bindings, Scalar, SetExpr, ValueExpr};
