//! Record schemas: the static description of a named-tuple type.

use crate::errors::RuntimeError;

/// Describe a record type before it is registered with a [`Runtime`](crate::Runtime).
///
/// ## Notes
/// - Field order is significant: it is the positional order of every instance.
/// - A schema is validated when it is registered, not when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    name: &'static str,
    doc: Option<&'static str>,
    fields: Vec<&'static str>,
}

impl RecordSchema {
    /// Create a schema with the given fully qualified type name and ordered field names.
    pub fn new(name: &'static str, fields: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            name,
            doc: None,
            fields: fields.into_iter().collect(),
        }
    }

    /// Attach a docstring to the type.
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> Option<&'static str> {
        self.doc
    }

    /// Ordered field names.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Position of a field, if the schema has it.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    /// Check the invariants the runtime relies on: a non-empty type name, at least one field, and unique non-empty
    /// field names.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        let invalid = |reason: String| RuntimeError::InvalidSchema {
            type_name: self.name.to_string(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("type name is empty".to_string()));
        }
        if self.fields.is_empty() {
            return Err(invalid("a record type needs at least one field".to_string()));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.is_empty() {
                return Err(invalid(format!("field {i} has an empty name")));
            }
            if self.fields[..i].contains(field) {
                return Err(invalid(format!("duplicate field '{field}'")));
            }
        }
        Ok(())
    }
}
