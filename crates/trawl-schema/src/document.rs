use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;
use crate::naming::NamingConvention;

/// The field-descriptor table for one document type.
///
/// Built once at startup and passed by reference into the compiler; there is
/// no global registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSchema {
    /// Document type name, e.g. `Account`.
    pub name: String,
    pub naming: NamingConvention,
    /// Explicit index name; when absent the lowercased type name is used.
    #[serde(default)]
    pub index: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl DocumentSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            naming: NamingConvention::CamelCase,
            index: None,
            fields: Vec::new(),
        }
    }

    pub fn naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }

    pub fn index(mut self, name: impl Into<String>) -> Self {
        self.index = Some(name.into());
        self
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Look up a top-level descriptor by source field name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|d| d.name == name)
    }

    /// The index this document type lives in.
    pub fn index_name(&self) -> String {
        match &self.index {
            Some(name) => name.clone(),
            None => self.name.to_lowercase(),
        }
    }

    /// The wire name of one descriptor under this schema's convention.
    pub fn wire_name(&self, descriptor: &FieldDescriptor) -> String {
        match &descriptor.wire_name {
            Some(name) => name.clone(),
            None => self.naming.apply(&descriptor.name),
        }
    }
}
