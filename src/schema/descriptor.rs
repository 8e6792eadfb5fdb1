// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message descriptors.
//!
//! A [`MessageDescriptor`] is an ordered field list plus two lookup indices
//! (by tag, by name). Indices are built once in [`MessageDescriptor::new`]
//! and the descriptor is immutable afterwards.

use std::collections::HashMap;

use crate::core::{CodecError, Result};
use crate::schema::ast::{Field, FieldKind, MAX_TAG};

/// Schema metadata for one message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<Field>,
    by_tag: HashMap<u32, usize>,
    by_name: HashMap<String, usize>,
}

impl MessageDescriptor {
    /// Create a descriptor, validating its fields.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::InvalidSchema` when the name is empty, a tag is
    /// 0 or above 2^29-1, or a tag or field name appears twice.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CodecError::invalid_schema("", "type name is empty"));
        }

        let mut by_tag = HashMap::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());

        for (index, field) in fields.iter().enumerate() {
            if field.tag == 0 {
                return Err(CodecError::invalid_schema(
                    &name,
                    format!("field '{}' uses tag 0", field.name),
                ));
            }
            if field.tag > MAX_TAG {
                return Err(CodecError::invalid_schema(
                    &name,
                    format!("field '{}' tag {} exceeds {MAX_TAG}", field.name, field.tag),
                ));
            }
            if field.name.is_empty() {
                return Err(CodecError::invalid_schema(
                    &name,
                    format!("field with tag {} has no name", field.tag),
                ));
            }
            if let Some(prev) = by_tag.insert(field.tag, index) {
                return Err(CodecError::invalid_schema(
                    &name,
                    format!(
                        "tag {} used by both '{}' and '{}'",
                        field.tag, fields[prev].name, field.name
                    ),
                ));
            }
            if by_name.insert(field.name.clone(), index).is_some() {
                return Err(CodecError::invalid_schema(
                    &name,
                    format!("field name '{}' declared twice", field.name),
                ));
            }
        }

        Ok(Self {
            name,
            fields,
            by_tag,
            by_name,
        })
    }

    /// Start building a descriptor.
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration (encode) order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by wire tag.
    pub fn field_by_tag(&self, tag: u32) -> Option<&Field> {
        self.by_tag.get(&tag).map(|&i| &self.fields[i])
    }

    /// Look up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Get the number of fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Names of message types this descriptor references.
    pub fn referenced_types(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| match &f.kind {
            FieldKind::Message(name) => Some(name.as_str()),
            FieldKind::Scalar(_) => None,
        })
    }
}

/// Chained construction of a [`MessageDescriptor`].
///
/// ```
/// use chatwire::schema::{MessageDescriptor, ScalarType};
///
/// let status = MessageDescriptor::builder("Status")
///     .optional("number", 1, ScalarType::UInt64)
///     .required("code", 2, ScalarType::Int32)
///     .required("msg", 3, ScalarType::String)
///     .build()
///     .unwrap();
/// assert_eq!(status.field_by_tag(2).unwrap().name, "code");
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    name: String,
    fields: Vec<Field>,
}

impl DescriptorBuilder {
    /// Append a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a required field.
    pub fn required(self, name: &str, tag: u32, kind: impl Into<FieldKind>) -> Self {
        self.field(Field::required(name, tag, kind))
    }

    /// Append an optional field.
    pub fn optional(self, name: &str, tag: u32, kind: impl Into<FieldKind>) -> Self {
        self.field(Field::optional(name, tag, kind))
    }

    /// Append a repeated field.
    pub fn repeated(self, name: &str, tag: u32, kind: impl Into<FieldKind>) -> Self {
        self.field(Field::repeated(name, tag, kind))
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> Result<MessageDescriptor> {
        MessageDescriptor::new(self.name, self.fields)
    }
}
