// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field-level schema types.

use std::fmt;

use crate::core::WireType;

/// Highest legal field number (29 bits).
pub const MAX_TAG: u32 = (1 << 29) - 1;

/// Scalar kinds a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// 32-bit signed integer (sign-extended varint)
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 64-bit unsigned integer
    UInt64,
    /// 64-bit float, carried as a varint of its bit pattern
    Double,
    /// UTF-8 text
    String,
    /// Opaque bytes
    Bytes,
}

impl ScalarType {
    /// Wire type this scalar is encoded with.
    pub const fn wire_type(self) -> WireType {
        match self {
            ScalarType::Int32 | ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Double => {
                WireType::Varint
            }
            ScalarType::String | ScalarType::Bytes => WireType::LengthDelimited,
        }
    }

    /// Parse a scalar name as written in schema listings.
    pub fn try_from_str(s: &str) -> Option<Self> {
        match s {
            "int32" => Some(ScalarType::Int32),
            "int64" => Some(ScalarType::Int64),
            "uint64" => Some(ScalarType::UInt64),
            "double" => Some(ScalarType::Double),
            "string" => Some(ScalarType::String),
            "bytes" => Some(ScalarType::Bytes),
            _ => None,
        }
    }

    /// Name as written in schema listings.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::UInt64 => "uint64",
            ScalarType::Double => "double",
            ScalarType::String => "string",
            ScalarType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a field holds: a scalar or a reference to another message type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar value
    Scalar(ScalarType),
    /// Embedded message, resolved by name in the registry at use time
    Message(String),
}

impl FieldKind {
    /// Shorthand for a message reference.
    pub fn message(type_name: impl Into<String>) -> Self {
        FieldKind::Message(type_name.into())
    }

    /// Wire type this kind is encoded with.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Scalar(scalar) => scalar.wire_type(),
            FieldKind::Message(_) => WireType::LengthDelimited,
        }
    }
}

impl From<ScalarType> for FieldKind {
    fn from(scalar: ScalarType) -> Self {
        FieldKind::Scalar(scalar)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldKind::Scalar(scalar) => write!(f, "{scalar}"),
            FieldKind::Message(name) => f.write_str(name),
        }
    }
}

/// How many values a field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one; encoding fails when absent
    Required,
    /// Zero or one; absence is omission on the wire
    Optional,
    /// Zero or more, order preserved
    Repeated,
}

impl Cardinality {
    /// Label as written in schema listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::Required => "required",
            Cardinality::Optional => "optional",
            Cardinality::Repeated => "repeated",
        }
    }
}

/// A field in a message descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name (record key)
    pub name: String,
    /// Field number on the wire
    pub tag: u32,
    /// Scalar kind or message reference
    pub kind: FieldKind,
    /// Required / optional / repeated
    pub cardinality: Cardinality,
}

impl Field {
    /// Create a field.
    pub fn new(
        name: impl Into<String>,
        tag: u32,
        kind: impl Into<FieldKind>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            name: name.into(),
            tag,
            kind: kind.into(),
            cardinality,
        }
    }

    /// Create a required field.
    pub fn required(name: impl Into<String>, tag: u32, kind: impl Into<FieldKind>) -> Self {
        Self::new(name, tag, kind, Cardinality::Required)
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, tag: u32, kind: impl Into<FieldKind>) -> Self {
        Self::new(name, tag, kind, Cardinality::Optional)
    }

    /// Create a repeated field.
    pub fn repeated(name: impl Into<String>, tag: u32, kind: impl Into<FieldKind>) -> Self {
        Self::new(name, tag, kind, Cardinality::Repeated)
    }

    /// Wire type derived from the field kind.
    pub fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }

    /// Check if this field is repeated.
    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    /// Check if this field is required.
    pub fn is_required(&self) -> bool {
        self.cardinality == Cardinality::Required
    }

    /// Referenced message type name, if any.
    pub fn message_type(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Message(name) => Some(name),
            FieldKind::Scalar(_) => None,
        }
    }
}
