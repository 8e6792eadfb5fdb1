// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-driven record decoder.
//!
//! The decoder tolerates schema drift: fields whose tag is not in the
//! descriptor, or whose wire type disagrees with the declared kind, are
//! skipped. Repeated fields accumulate across the whole buffer in
//! encounter order. Only malformed bytes fail a decode.

use tracing::{debug, warn};

use crate::config::DEFAULT_MAX_DEPTH;
use crate::core::{CodecError, CodecValue, Record, Result, SchemaRegistry};
use crate::encoding::cursor::{WireReader, WireValue};
use crate::schema::{Field, FieldKind, MessageDescriptor, ScalarType};
use crate::MessageDecoder;

/// Decoder bound to a frozen schema registry.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r SchemaRegistry,
    max_depth: usize,
}

impl<'r> Decoder<'r> {
    /// Create a decoder with the default depth limit.
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

    /// Decode `data` as message type `type_name`.
    ///
    /// Required fields are not enforced here; see [`Decoder::missing_required`].
    ///
    /// # Errors
    ///
    /// - `UnknownType` if `type_name` (or a nested type) is not registered
    /// - `MalformedVarint`, `TruncatedMessage`, `UnsupportedWireType` for bad bytes
    /// - `RecursionLimit` when nesting exceeds the depth limit
    pub fn decode(&self, type_name: &str, data: &[u8]) -> Result<Record> {
        let descriptor = self.registry.resolve(type_name)?;
        self.decode_message(descriptor, data, 1)
    }

    fn decode_message(
        &self,
        descriptor: &MessageDescriptor,
        data: &[u8],
        depth: usize,
    ) -> Result<Record> {
        if depth > self.max_depth {
            return Err(CodecError::recursion_limit(descriptor.name(), self.max_depth));
        }

        let mut record = Record::new();
        let mut reader = WireReader::new(data);

        while reader.has_more() {
            let entry = reader.read_entry()?;

            let Some(field) = descriptor.field_by_tag(entry.tag) else {
                debug!(
                    type_name = descriptor.name(),
                    tag = entry.tag,
                    wire_type = %entry.wire_type(),
                    "skipping unknown field"
                );
                continue;
            };

            let Some(value) = self.decode_value(field, entry.value, depth)? else {
                debug!(
                    type_name = descriptor.name(),
                    field = field.name.as_str(),
                    expected = %field.wire_type(),
                    actual = %entry.wire_type(),
                    "skipping field with mismatched wire type"
                );
                continue;
            };

            insert_value(&mut record, field, value);
        }

        Ok(record)
    }

    /// Interpret a raw wire value per the field's kind.
    ///
    /// Returns `None` when the wire type does not match the declared kind.
    fn decode_value(
        &self,
        field: &Field,
        raw: WireValue<'_>,
        depth: usize,
    ) -> Result<Option<CodecValue>> {
        let value = match (&field.kind, raw) {
            (FieldKind::Scalar(scalar), WireValue::Varint(v)) => match scalar {
                // int32 travels sign-extended; keep the low 32 bits
                ScalarType::Int32 => CodecValue::Int32(v as i32),
                ScalarType::Int64 => CodecValue::Int64(v as i64),
                ScalarType::UInt64 => CodecValue::UInt64(v),
                ScalarType::Double => CodecValue::Float64(f64::from_bits(v)),
                ScalarType::String | ScalarType::Bytes => return Ok(None),
            },
            (FieldKind::Scalar(ScalarType::String), WireValue::Bytes(bytes)) => {
                CodecValue::String(decode_utf8(&field.name, bytes))
            }
            (FieldKind::Scalar(ScalarType::Bytes), WireValue::Bytes(bytes)) => {
                CodecValue::Bytes(bytes.to_vec())
            }
            (FieldKind::Message(type_name), WireValue::Bytes(bytes)) => {
                let nested = self.registry.resolve(type_name)?;
                CodecValue::Struct(self.decode_message(nested, bytes, depth + 1)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(value))
    }

    /// Dotted paths of required fields absent from `record`, recursing into
    /// nested messages that are present.
    ///
    /// An empty result means the record satisfies every required field of
    /// `type_name`.
    pub fn missing_required(&self, type_name: &str, record: &Record) -> Result<Vec<String>> {
        let descriptor = self.registry.resolve(type_name)?;
        let mut missing = Vec::new();
        self.collect_missing(descriptor, record, "", &mut missing)?;
        Ok(missing)
    }

    fn collect_missing(
        &self,
        descriptor: &MessageDescriptor,
        record: &Record,
        prefix: &str,
        missing: &mut Vec<String>,
    ) -> Result<()> {
        for field in descriptor.fields() {
            let path = format!("{prefix}{}", field.name);
            let value = match record.get(&field.name) {
                None | Some(CodecValue::Null) => {
                    if field.is_required() {
                        missing.push(path);
                    }
                    continue;
                }
                Some(value) => value,
            };

            let Some(type_name) = field.message_type() else {
                continue;
            };
            let nested = self.registry.resolve(type_name)?;
            match value {
                CodecValue::Struct(inner) => {
                    self.collect_missing(nested, inner, &format!("{path}."), missing)?;
                }
                CodecValue::Array(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if let CodecValue::Struct(inner) = item {
                            self.collect_missing(nested, inner, &format!("{path}[{i}]."), missing)?;
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl MessageDecoder for Decoder<'_> {
    fn decode_message(&self, type_name: &str, data: &[u8]) -> Result<Record> {
        self.decode(type_name, data)
    }
}

fn decode_utf8(field: &str, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(field, error = %e, "invalid UTF-8 in string field, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn insert_value(record: &mut Record, field: &Field, value: CodecValue) {
    if field.is_repeated() {
        let slot = record
            .entry(field.name.clone())
            .or_insert_with(|| CodecValue::Array(Vec::new()));
        if let CodecValue::Array(items) = slot {
            items.push(value);
        }
        return;
    }

    match value {
        CodecValue::Struct(incoming) => {
            if let Some(CodecValue::Struct(existing)) = record.get_mut(&field.name) {
                merge_records(existing, incoming);
            } else {
                record.insert(field.name.clone(), CodecValue::Struct(incoming));
            }
        }
        value => {
            record.insert(field.name.clone(), value);
        }
    }
}

/// Merge a later occurrence of a message into an earlier one: nested
/// messages merge recursively, lists append, everything else is replaced.
pub(crate) fn merge_records(target: &mut Record, source: Record) {
    for (key, value) in source {
        let value = match (target.get_mut(&key), value) {
            (Some(CodecValue::Struct(existing)), CodecValue::Struct(incoming)) => {
                merge_records(existing, incoming);
                continue;
            }
            (Some(CodecValue::Array(existing)), CodecValue::Array(incoming)) => {
                existing.extend(incoming);
                continue;
            }
            (_, value) => value,
        };
        target.insert(key, value);
    }
}
