// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec value type system.
//!
//! A [`Record`] is the loosely-typed currency of the encoder and decoder:
//! field name -> [`CodecValue`], where values are scalars, nested records,
//! or ordered sequences of either.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name -> value mapping for one message.
pub type Record = BTreeMap<String, CodecValue>;

/// Unified value type for encoded and decoded messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CodecValue {
    // Signed integers
    Int32(i32),
    Int64(i64),

    // Unsigned integers
    UInt64(u64),

    // Floating point
    Float64(f64),

    // String (UTF-8)
    String(String),

    // Opaque bytes
    Bytes(Vec<u8>),

    // Repeated field values, in wire order
    Array(Vec<CodecValue>),

    // Nested message
    Struct(Record),

    /// Explicitly unset; treated as absent by the encoder.
    Null,
}

impl CodecValue {
    /// Check if this value is an integer type (signed or unsigned).
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            CodecValue::Int32(_) | CodecValue::Int64(_) | CodecValue::UInt64(_)
        )
    }

    /// Check if this value is a container type (array or struct).
    pub fn is_container(&self) -> bool {
        matches!(self, CodecValue::Array(_) | CodecValue::Struct(_))
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CodecValue::Null)
    }

    /// Try to convert this value to f64 (for numeric values only).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CodecValue::Int32(v) => Some(*v as f64),
            CodecValue::Int64(v) => Some(*v as f64),
            CodecValue::UInt64(v) => Some(*v as f64),
            CodecValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to convert this value to i64 (for integer types only).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CodecValue::Int32(v) => Some(*v as i64),
            CodecValue::Int64(v) => Some(*v),
            CodecValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to convert this value to u64 (for non-negative integers only).
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CodecValue::UInt64(v) => Some(*v),
            CodecValue::Int32(v) => u64::try_from(*v).ok(),
            CodecValue::Int64(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Try to get the inner string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CodecValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CodecValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get the inner struct.
    pub fn as_struct(&self) -> Option<&Record> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner struct.
    pub fn as_struct_mut(&mut self) -> Option<&mut Record> {
        match self {
            CodecValue::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the inner array.
    pub fn as_array(&self) -> Option<&[CodecValue]> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get a mutable reference to the inner array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<CodecValue>> {
        match self {
            CodecValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            CodecValue::Int32(_) => "int32",
            CodecValue::Int64(_) => "int64",
            CodecValue::UInt64(_) => "uint64",
            CodecValue::Float64(_) => "double",
            CodecValue::String(_) => "string",
            CodecValue::Bytes(_) => "bytes",
            CodecValue::Array(_) => "array",
            CodecValue::Struct(_) => "struct",
            CodecValue::Null => "null",
        }
    }

    /// Convert to a plain JSON value.
    ///
    /// Bytes become lowercase hex strings, since JSON has no binary type.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            CodecValue::Int32(v) => Value::from(*v),
            CodecValue::Int64(v) => Value::from(*v),
            CodecValue::UInt64(v) => Value::from(*v),
            CodecValue::Float64(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CodecValue::String(s) => Value::String(s.clone()),
            CodecValue::Bytes(b) => Value::String(hex::encode(b)),
            CodecValue::Array(arr) => Value::Array(arr.iter().map(CodecValue::to_json).collect()),
            CodecValue::Struct(record) => record_to_json(record),
            CodecValue::Null => Value::Null,
        }
    }

    /// Convert from a plain JSON value.
    ///
    /// Integers map to `Int64` (or `UInt64` above `i64::MAX`), floats to
    /// `Float64`, objects to `Struct`. Booleans map to `Int64` 0/1 since the
    /// wire has no boolean kind. The encoder coerces these to the declared
    /// field kinds.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CodecValue::Null,
            Value::Bool(b) => CodecValue::Int64(i64::from(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CodecValue::Int64(i)
                } else if let Some(u) = n.as_u64() {
                    CodecValue::UInt64(u)
                } else {
                    CodecValue::Float64(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) => CodecValue::String(s.clone()),
            Value::Array(arr) => CodecValue::Array(arr.iter().map(CodecValue::from_json).collect()),
            Value::Object(_) => CodecValue::Struct(record_from_json(value)),
        }
    }
}

/// Convert a record to a JSON object.
pub fn record_to_json(record: &Record) -> serde_json::Value {
    serde_json::Value::Object(
        record
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Convert a JSON object to a record. Non-object values yield an empty record.
pub fn record_from_json(value: &serde_json::Value) -> Record {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), CodecValue::from_json(v)))
                .collect()
        })
        .unwrap_or_default()
}

impl fmt::Display for CodecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecValue::Int32(v) => write!(f, "{v}"),
            CodecValue::Int64(v) => write!(f, "{v}"),
            CodecValue::UInt64(v) => write!(f, "{v}"),
            CodecValue::Float64(v) => write!(f, "{v}"),
            CodecValue::String(v) => write!(f, "\"{v}\""),
            CodecValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            CodecValue::Array(v) => write!(f, "[{} elements]", v.len()),
            CodecValue::Struct(v) => write!(f, "{{{} fields}}", v.len()),
            CodecValue::Null => write!(f, "null"),
        }
    }
}

impl From<i32> for CodecValue {
    fn from(v: i32) -> Self {
        CodecValue::Int32(v)
    }
}

impl From<i64> for CodecValue {
    fn from(v: i64) -> Self {
        CodecValue::Int64(v)
    }
}

impl From<u64> for CodecValue {
    fn from(v: u64) -> Self {
        CodecValue::UInt64(v)
    }
}

impl From<f64> for CodecValue {
    fn from(v: f64) -> Self {
        CodecValue::Float64(v)
    }
}

impl From<&str> for CodecValue {
    fn from(v: &str) -> Self {
        CodecValue::String(v.to_string())
    }
}

impl From<String> for CodecValue {
    fn from(v: String) -> Self {
        CodecValue::String(v)
    }
}

impl From<Vec<u8>> for CodecValue {
    fn from(v: Vec<u8>) -> Self {
        CodecValue::Bytes(v)
    }
}

impl From<Record> for CodecValue {
    fn from(v: Record) -> Self {
        CodecValue::Struct(v)
    }
}

impl From<Vec<CodecValue>> for CodecValue {
    fn from(v: Vec<CodecValue>) -> Self {
        CodecValue::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_checking() {
        assert!(CodecValue::Int32(42).is_integer());
        assert!(CodecValue::UInt64(42).is_integer());
        assert!(!CodecValue::Float64(2.5).is_integer());
        assert!(CodecValue::Array(vec![]).is_container());
        assert!(CodecValue::Null.is_null());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(CodecValue::Int32(-7).as_i64(), Some(-7));
        assert_eq!(CodecValue::UInt64(42).as_i64(), Some(42));
        assert_eq!(CodecValue::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(CodecValue::Float64(2.5).as_i64(), None);
    }

    #[test]
    fn test_as_u64() {
        assert_eq!(CodecValue::Int64(5).as_u64(), Some(5));
        assert_eq!(CodecValue::Int64(-5).as_u64(), None);
        assert_eq!(CodecValue::Int32(-1).as_u64(), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CodecValue::Int32(42).as_f64(), Some(42.0));
        assert_eq!(CodecValue::String("x".into()).as_f64(), None);
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!({
            "status": {"code": 1, "msg": "success"},
            "ids": ["a", "b"],
            "coin": 2.5
        });
        let record = record_from_json(&json);
        assert_eq!(
            record["status"].as_struct().unwrap()["code"],
            CodecValue::Int64(1)
        );
        assert_eq!(record["ids"].as_array().unwrap().len(), 2);
        assert_eq!(record["coin"], CodecValue::Float64(2.5));
        assert_eq!(record_to_json(&record), json);
    }

    #[test]
    fn test_bytes_to_json_hex() {
        assert_eq!(
            CodecValue::Bytes(vec![0xde, 0xad]).to_json(),
            serde_json::json!("dead")
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CodecValue::Int32(1).to_string(), "1");
        assert_eq!(CodecValue::String("hi".into()).to_string(), "\"hi\"");
        assert_eq!(CodecValue::Bytes(vec![1, 2]).to_string(), "<2 bytes>");
        assert_eq!(CodecValue::Null.to_string(), "null");
    }

    #[test]
    fn test_serialization() {
        let value = CodecValue::Struct(Record::from([("a".to_string(), CodecValue::Int32(1))]));
        let json = serde_json::to_string(&value).unwrap();
        let decoded: CodecValue = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, value);
    }
}
