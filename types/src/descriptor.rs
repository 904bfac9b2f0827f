//! Record descriptors: the explicit per-type field table.
//!
//! A descriptor lists a record's fields in declaration order. Declaration
//! order matters: the index builder walks it front to back, so a later field
//! carrying the same tag as an earlier one wins.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tag::Tag;

/// How a field participates in mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// A leaf value copied by assignment.
    Scalar,
    /// A nested record. Its fields are flattened into the parent's tag index.
    Record,
    /// An ordered sequence of nested records, matched as a whole by tag.
    Collection,
}

impl FieldKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Scalar => "scalar",
            FieldKind::Record => "record",
            FieldKind::Collection => "collection",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    type_name: Cow<'static, str>,
    tag: Option<Tag>,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// An untagged field. Use [`FieldDescriptor::with_tag`] to attach a label.
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        type_name: impl Into<Cow<'static, str>>,
        kind: FieldKind,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            tag: None,
            kind,
        }
    }

    /// Attach a tag label. An empty label leaves the field untagged.
    #[must_use]
    pub fn with_tag(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.tag = Tag::parse(label);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("record name must not be empty")]
    EmptyRecordName,
    #[error("record `{record}` declares a field with an empty name")]
    EmptyFieldName { record: String },
    #[error("record `{record}` declares field `{field}` more than once")]
    DuplicateField { record: String, field: String },
}

/// The static shape of a record type.
///
/// Invariant: the record name and every field name are non-empty, and field
/// names are unique within the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDescriptor {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<Self, DescriptorError> {
        let name = name.into();
        if name.is_empty() {
            return Err(DescriptorError::EmptyRecordName);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.name().is_empty() {
                return Err(DescriptorError::EmptyFieldName {
                    record: name.into_owned(),
                });
            }
            if !seen.insert(field.name()) {
                return Err(DescriptorError::DuplicateField {
                    record: name.into_owned(),
                    field: field.name().to_string(),
                });
            }
        }

        Ok(Self { name, fields })
    }

    /// Builds a descriptor for a Rust struct without re-checking field names.
    ///
    /// The compiler already guarantees struct field names are non-empty and
    /// unique. Used by [`record!`](crate::record).
    #[doc(hidden)]
    #[must_use]
    pub fn from_rust_struct(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            fields,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
