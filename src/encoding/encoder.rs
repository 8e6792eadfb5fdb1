// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven record encoder.
//!
//! Fields are written in descriptor order. Absent (or `Null`) optional
//! fields are omitted from the wire entirely; absent required fields fail
//! with `MissingRequiredField`. Nested messages are encoded into their own
//! buffer and appended as a length-delimited payload.

use tracing::debug;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::core::{CodecError, CodecValue, Record, Result, SchemaRegistry};
use crate::encoding::writer::WireWriter;
use crate::schema::{Field, FieldKind, MessageDescriptor, ScalarType};

/// Encoder bound to a frozen schema registry.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r SchemaRegistry,
    max_depth: usize,
}

impl<'r> Encoder<'r> {
    /// Create an encoder with the default depth limit.
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the maximum nested-message depth (the top-level message is depth 1).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Encode `record` as message type `type_name`.
    ///
    /// # Errors
    ///
    /// - `UnknownType` if `type_name` (or a nested type) is not registered
    /// - `MissingRequiredField` for an absent required field
    /// - `EncodingError` when a value does not fit its field
    /// - `RecursionLimit` when nesting exceeds the depth limit
    pub fn encode(&self, type_name: &str, record: &Record) -> Result<Vec<u8>> {
        let descriptor = self.registry.resolve(type_name)?;
        Ok(self.encode_message(descriptor, record, 1)?.finish())
    }

    fn encode_message(
        &self,
        descriptor: &MessageDescriptor,
        record: &Record,
        depth: usize,
    ) -> Result<WireWriter> {
        if depth > self.max_depth {
            return Err(CodecError::recursion_limit(descriptor.name(), self.max_depth));
        }

        for key in record.keys() {
            if descriptor.field_by_name(key).is_none() {
                debug!(
                    type_name = descriptor.name(),
                    key = key.as_str(),
                    "ignoring record key with no matching field"
                );
            }
        }

        let mut writer = WireWriter::new();
        for field in descriptor.fields() {
            match record.get(&field.name) {
                None | Some(CodecValue::Null) => {
                    if field.is_required() {
                        return Err(CodecError::missing_required(descriptor.name(), &field.name));
                    }
                }
                Some(value) if field.is_repeated() => {
                    self.encode_repeated(&mut writer, field, value, depth)?;
                }
                Some(CodecValue::Array(_)) => {
                    return Err(CodecError::encoding(
                        &field.name,
                        "array given for a non-repeated field",
                    ));
                }
                Some(value) => self.encode_value(&mut writer, field, value, depth)?,
            }
        }
        Ok(writer)
    }

    fn encode_repeated(
        &self,
        writer: &mut WireWriter,
        field: &Field,
        value: &CodecValue,
        depth: usize,
    ) -> Result<()> {
        let elements = match value {
            CodecValue::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        for element in elements {
            if element.is_null() {
                return Err(CodecError::encoding(
                    &field.name,
                    "null element in repeated field",
                ));
            }
            self.encode_value(writer, field, element, depth)?;
        }
        Ok(())
    }

    fn encode_value(
        &self,
        writer: &mut WireWriter,
        field: &Field,
        value: &CodecValue,
        depth: usize,
    ) -> Result<()> {
        match &field.kind {
            FieldKind::Scalar(scalar) => encode_scalar(writer, field, *scalar, value),
            FieldKind::Message(type_name) => {
                let nested = value.as_struct().ok_or_else(|| {
                    CodecError::encoding(
                        &field.name,
                        format!("expected {type_name} struct, got {}", value.type_name()),
                    )
                })?;
                let descriptor = self.registry.resolve(type_name)?;
                let payload = self.encode_message(descriptor, nested, depth + 1)?;
                writer.write_message_field(field.tag, &payload);
                Ok(())
            }
        }
    }
}

fn encode_scalar(
    writer: &mut WireWriter,
    field: &Field,
    scalar: ScalarType,
    value: &CodecValue,
) -> Result<()> {
    let mismatch = || {
        CodecError::encoding(
            &field.name,
            format!("cannot encode {} as {scalar}", value.type_name()),
        )
    };

    match scalar {
        ScalarType::Int32 => {
            let wide = value.as_i64().ok_or_else(mismatch)?;
            let narrow = i32::try_from(wide).map_err(|_| {
                CodecError::encoding(&field.name, format!("{wide} out of int32 range"))
            })?;
            // sign-extend so negatives match protobuf int32 encoding
            writer.write_varint_field(field.tag, i64::from(narrow) as u64);
        }
        ScalarType::Int64 => {
            let v = match value {
                CodecValue::UInt64(v) => i64::try_from(*v).map_err(|_| {
                    CodecError::encoding(&field.name, format!("{v} out of int64 range"))
                })?,
                other => other.as_i64().ok_or_else(mismatch)?,
            };
            writer.write_varint_field(field.tag, v as u64);
        }
        ScalarType::UInt64 => {
            let v = match value {
                CodecValue::Int32(_) | CodecValue::Int64(_) => value.as_u64().ok_or_else(|| {
                    CodecError::encoding(&field.name, format!("{value} is negative"))
                })?,
                other => other.as_u64().ok_or_else(mismatch)?,
            };
            writer.write_varint_field(field.tag, v);
        }
        ScalarType::Double => {
            let v = value.as_f64().ok_or_else(mismatch)?;
            writer.write_varint_field(field.tag, v.to_bits());
        }
        ScalarType::String => {
            let s = value.as_str().ok_or_else(mismatch)?;
            writer.write_string_field(field.tag, s);
        }
        ScalarType::Bytes => {
            let bytes = match value {
                CodecValue::Bytes(b) => b.as_slice(),
                CodecValue::String(s) => s.as_bytes(),
                _ => return Err(mismatch()),
            };
            writer.write_length_delimited(field.tag, bytes);
        }
    }
    Ok(())
}
