mod classify;
mod compile;
mod dnf;
mod dsl;
mod error;
mod resolve;

pub use classify::{Condition, ConditionKind};
pub use compile::{Compiled, CompiledQuery, Compiler, SortField};
pub use dnf::{AndGroup, Dnf};
pub use dsl::{QueryNode, RangeOp};
pub use error::{CompileError, CompileWarning};
pub use resolve::{EXACT_SUFFIX, FieldCache, FieldMeta, exact_path, resolve_field};
