// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Growable buffer writer for protobuf-style field streams.
//!
//! Nested messages are serialized into their own writer first and then
//! appended as a length-delimited payload, so every length is known before
//! its prefix is written and nothing is backpatched.

use crate::core::WireType;
use crate::encoding::varint::encode_varint;

/// Append-only writer of `(key, value)` pairs.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Write a field key.
    #[inline]
    pub fn write_tag(&mut self, tag: u32, wire_type: WireType) {
        encode_varint(
            (u64::from(tag) << 3) | u64::from(wire_type.as_u8()),
            &mut self.buf,
        );
    }

    /// Write a VARINT field.
    pub fn write_varint_field(&mut self, tag: u32, value: u64) {
        self.write_tag(tag, WireType::Varint);
        encode_varint(value, &mut self.buf);
    }

    /// Write a LENGTH_DELIMITED field.
    pub fn write_length_delimited(&mut self, tag: u32, payload: &[u8]) {
        self.write_tag(tag, WireType::LengthDelimited);
        encode_varint(payload.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(payload);
    }

    /// Write a UTF-8 string field.
    pub fn write_string_field(&mut self, tag: u32, value: &str) {
        self.write_length_delimited(tag, value.as_bytes());
    }

    /// Write a nested message serialized by another writer.
    pub fn write_message_field(&mut self, tag: u32, nested: &WireWriter) {
        self.write_length_delimited(tag, nested.as_bytes());
    }

    /// Consume the writer and return the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
