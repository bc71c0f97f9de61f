use trawl_schema::{DocumentSchema, FieldDescriptor, FieldType};

/// Schema shared by the compiler scenario tests: a flat mix of storage kinds
/// plus one nested sub-document with a wire-name override.
pub fn account_schema() -> DocumentSchema {
    DocumentSchema::new("Account")
        .field(FieldDescriptor::new("Name", FieldType::Text))
        .field(FieldDescriptor::new("Status", FieldType::Keyword))
        .field(FieldDescriptor::new("Revenue", FieldType::Numeric))
        .field(FieldDescriptor::new("Active", FieldType::Boolean))
        .field(FieldDescriptor::new("Created", FieldType::Date))
        .field(FieldDescriptor::new(
            "Address",
            FieldType::Object(vec![
                FieldDescriptor::new("City", FieldType::Text),
                FieldDescriptor::new("ZipCode", FieldType::Keyword).wire_name("zip"),
            ]),
        ))
}
