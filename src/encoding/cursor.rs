// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for reading protobuf-style field streams.
//!
//! The reader walks an immutable buffer one `(key, value)` pair at a time.
//! Each key is a varint packing `field_number << 3 | wire_type`. Only
//! VARINT (0) and LENGTH_DELIMITED (2) are understood; fixed-width and
//! group wire types fail with `UnsupportedWireType`.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chatwire::encoding::cursor::{WireReader, WireValue};
//!
//! // field 2 = varint 1, field 3 = "ok"
//! let data = [0x10, 0x01, 0x1A, 0x02, b'o', b'k'];
//! let mut reader = WireReader::new(&data);
//! let first = reader.read_entry()?;
//! assert_eq!((first.tag, first.value), (2, WireValue::Varint(1)));
//! let second = reader.read_entry()?;
//! assert_eq!(second.value, WireValue::Bytes(b"ok"));
//! assert!(!reader.has_more());
//! # Ok(())
//! # }
//! ```

use crate::core::{CodecError, Result, WireType};
use crate::encoding::varint::decode_varint;
use crate::schema::MAX_TAG;

/// Raw value of one wire field, before schema interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireValue<'a> {
    /// VARINT payload
    Varint(u64),
    /// LENGTH_DELIMITED payload, borrowed from the input buffer
    Bytes(&'a [u8]),
}

impl WireValue<'_> {
    /// Wire type this value was read with.
    pub fn wire_type(&self) -> WireType {
        match self {
            WireValue::Varint(_) => WireType::Varint,
            WireValue::Bytes(_) => WireType::LengthDelimited,
        }
    }
}

/// One decoded `(tag, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireEntry<'a> {
    /// Field number
    pub tag: u32,
    /// Raw value
    pub value: WireValue<'a>,
    /// Offset of the field key in the buffer
    pub position: usize,
}

impl WireEntry<'_> {
    /// Wire type of this entry.
    pub fn wire_type(&self) -> WireType {
        self.value.wire_type()
    }
}

/// Cursor over a protobuf-style byte buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Get the current read position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Check whether unread bytes remain.
    #[inline]
    pub fn has_more(&self) -> bool {
        self.pos < self.data.len()
    }

    /// Read a raw varint.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, consumed) = decode_varint(self.data, self.pos)?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a field key and split it into `(field_number, wire_type)`.
    ///
    /// # Errors
    ///
    /// `MalformedVarint` for a corrupt key or a field number of 0 or above
    /// 2^29-1, `UnsupportedWireType` for wire types other than 0 and 2.
    pub fn read_tag(&mut self) -> Result<(u32, WireType)> {
        let start = self.pos;
        let key = self.read_varint()?;

        let field_number = key >> 3;
        if field_number == 0 || field_number > u64::from(MAX_TAG) {
            return Err(CodecError::malformed_varint(
                start,
                format!("field key carries invalid field number {field_number}"),
            ));
        }

        let raw_wire_type = (key & 0x07) as u8;
        let wire_type = WireType::from_u8(raw_wire_type)
            .ok_or_else(|| CodecError::unsupported_wire_type(raw_wire_type, start))?;

        Ok((field_number as u32, wire_type))
    }

    /// Read the value of a VARINT field.
    #[inline]
    pub fn read_varint_field(&mut self) -> Result<u64> {
        self.read_varint()
    }

    /// Read the payload of a LENGTH_DELIMITED field.
    ///
    /// # Errors
    ///
    /// `TruncatedMessage` when the declared length exceeds the remaining bytes.
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let length = self.read_varint()?;
        if length > self.remaining() as u64 {
            return Err(CodecError::truncated(length, self.pos, self.data.len()));
        }
        let start = self.pos;
        self.pos += length as usize;
        Ok(&self.data[start..self.pos])
    }

    /// Read one complete `(tag, value)` entry.
    pub fn read_entry(&mut self) -> Result<WireEntry<'a>> {
        let position = self.pos;
        let (tag, wire_type) = self.read_tag()?;
        let value = match wire_type {
            WireType::Varint => WireValue::Varint(self.read_varint_field()?),
            WireType::LengthDelimited => WireValue::Bytes(self.read_length_delimited()?),
        };
        Ok(WireEntry {
            tag,
            value,
            position,
        })
    }

    /// Skip over a value of the given wire type.
    pub fn skip(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => self.read_varint_field().map(|_| ()),
            WireType::LengthDelimited => self.read_length_delimited().map(|_| ()),
        }
    }

    /// Iterate over the remaining entries.
    ///
    /// The iterator yields the first error and then stops.
    pub fn entries(self) -> WireEntries<'a> {
        WireEntries {
            reader: self,
            failed: false,
        }
    }
}

/// Iterator over wire entries; see [`WireReader::entries`].
#[derive(Debug, Clone)]
pub struct WireEntries<'a> {
    reader: WireReader<'a>,
    failed: bool,
}

impl<'a> Iterator for WireEntries<'a> {
    type Item = Result<WireEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.reader.has_more() {
            return None;
        }
        let entry = self.reader.read_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

/// Whether `bytes` reads as one or more complete wire entries with nothing
/// left over.
///
/// Short text often satisfies this too, so callers that care should also
/// keep the text reading (see [`printable_text`]).
pub fn is_message(bytes: &[u8]) -> bool {
    !bytes.is_empty() && WireReader::new(bytes).entries().all(|e| e.is_ok())
}

/// `bytes` as text, if it is UTF-8 with no control characters other than
/// tab and line breaks.
pub fn printable_text(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.chars()
        .all(|c| !c.is_control() || matches!(c, '\t' | '\r' | '\n'))
        .then_some(text)
}
