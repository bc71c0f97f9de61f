use serde::{Deserialize, Serialize};

/// Storage kind the engine uses for a leaf field.
///
/// `Keyword` strings match exactly; `Text` strings are analyzed and carry a
/// derived exact sub-field for equality, range, and sort operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Keyword,
    Text,
    Numeric,
    Date,
    Boolean,
    Identifier,
}

/// Declared type of a field as registered in a descriptor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Keyword,
    Numeric,
    Date,
    Boolean,
    Identifier,
    /// A sub-document with its own descriptor table.
    Object(Vec<FieldDescriptor>),
    /// An array; all elements share one declared type.
    Collection(Box<FieldType>),
    /// A nullable wrapper; classification unwraps to the inner type.
    Optional(Box<FieldType>),
}

impl FieldType {
    /// Strip `Optional` wrappers.
    pub fn unwrap_optional(&self) -> &FieldType {
        match self {
            Self::Optional(inner) => inner.unwrap_optional(),
            other => other,
        }
    }

    /// The scalar storage kind of a leaf. `Optional` and `Collection`
    /// wrappers unwrap to their element type; object fields have none.
    pub fn storage_kind(&self) -> Option<StorageKind> {
        match self {
            Self::Text => Some(StorageKind::Text),
            Self::Keyword => Some(StorageKind::Keyword),
            Self::Numeric => Some(StorageKind::Numeric),
            Self::Date => Some(StorageKind::Date),
            Self::Boolean => Some(StorageKind::Boolean),
            Self::Identifier => Some(StorageKind::Identifier),
            Self::Object(_) => None,
            Self::Collection(inner) | Self::Optional(inner) => inner.storage_kind(),
        }
    }

    /// True when this declares a sub-document, ignoring nullability.
    /// A `Collection` of objects is deliberately NOT an object here.
    pub fn is_object(&self) -> bool {
        matches!(self.unwrap_optional(), Self::Object(_))
    }

    /// The descriptor table of a sub-document field, if any. Unlike
    /// [`is_object`](Self::is_object) this also looks through collections, so
    /// paths can be walked into array elements.
    pub fn object_fields(&self) -> Option<&[FieldDescriptor]> {
        match self {
            Self::Object(fields) => Some(fields),
            Self::Collection(inner) | Self::Optional(inner) => inner.object_fields(),
            _ => None,
        }
    }
}

/// One registered field: its source name, declared type, and wire options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: FieldType,
    /// Explicit wire name; when absent the schema's naming convention applies.
    #[serde(default)]
    pub wire_name: Option<String>,
    /// Whether a text field carries a derived exact sub-field. Default true.
    #[serde(default = "default_exact")]
    pub exact: bool,
    /// Force nested-scope treatment regardless of the declared type.
    #[serde(default)]
    pub nested: bool,
}

fn default_exact() -> bool {
    true
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            wire_name: None,
            exact: true,
            nested: false,
        }
    }

    pub fn wire_name(mut self, name: impl Into<String>) -> Self {
        self.wire_name = Some(name.into());
        self
    }

    /// Declare that this text field has no exact sub-field.
    pub fn without_exact(mut self) -> Self {
        self.exact = false;
        self
    }

    pub fn nested(mut self) -> Self {
        self.nested = true;
        self
    }
}
