mod document;
mod field;
mod naming;

pub use document::DocumentSchema;
pub use field::{FieldDescriptor, FieldType, StorageKind};
pub use naming::NamingConvention;
