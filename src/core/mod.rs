// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout chatwire.
//!
//! This module provides the foundational types for the library:
//! - [`CodecError`] - Error taxonomy shared by every codec path
//! - [`CodecValue`] / [`Record`] - Loosely-typed message values
//! - [`SchemaRegistry`] - Frozen name -> descriptor table
//! - [`WireType`] - The two wire types the codec speaks

pub mod error;
pub mod registry;
pub mod value;

pub use error::{CodecError, Result};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use value::{record_from_json, record_to_json, CodecValue, Record};

/// Wire type carried in the low 3 bits of every field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Base-128 varint (integers, doubles as bit patterns)
    Varint,
    /// Varint length prefix followed by raw bytes (strings, bytes, messages)
    LengthDelimited,
}

impl WireType {
    /// Raw 3-bit value written on the wire.
    pub const fn as_u8(self) -> u8 {
        match self {
            WireType::Varint => 0,
            WireType::LengthDelimited => 2,
        }
    }

    /// Parse a raw wire type. Only 0 and 2 are supported.
    pub const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(WireType::Varint),
            2 => Some(WireType::LengthDelimited),
            _ => None,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::LengthDelimited => "length-delimited",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
