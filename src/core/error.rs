// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for chatwire.
//!
//! Errors fall into four groups:
//! - Wire decoding (malformed varints, truncated fields, unsupported wire types)
//! - Encoding (missing required fields, out-of-range values)
//! - Schema and registry (unknown/duplicate types, invalid descriptors)
//! - Configuration

use thiserror::Error;

/// Errors produced by the codec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// A varint ran past the end of the buffer or past 10 bytes.
    #[error("Malformed varint at position {position}: {reason}")]
    MalformedVarint {
        /// Offset of the first varint byte
        position: usize,
        /// What went wrong
        reason: String,
    },

    /// A length-delimited header claims more bytes than remain.
    #[error(
        "Truncated message: field at position {position} declares {length} bytes (buffer length: {buffer_len})"
    )]
    TruncatedMessage {
        /// Declared payload length
        length: u64,
        /// Offset of the payload start
        position: usize,
        /// Total buffer length
        buffer_len: usize,
    },

    /// Wire type outside {VARINT, LENGTH_DELIMITED}.
    #[error("Unsupported wire type {wire_type} at position {position}")]
    UnsupportedWireType {
        /// Raw 3-bit wire type
        wire_type: u8,
        /// Offset of the field key
        position: usize,
    },

    /// A REQUIRED field was absent from a record being encoded.
    #[error("Missing required field '{field}' in '{type_name}'")]
    MissingRequiredField {
        /// Message type being encoded
        type_name: String,
        /// Field name
        field: String,
    },

    /// Type name not present in the registry.
    #[error("Unknown type: '{type_name}'")]
    UnknownType {
        /// Type name that was looked up
        type_name: String,
    },

    /// Type name registered twice.
    #[error("Duplicate type: '{type_name}'")]
    DuplicateType {
        /// Type name that was registered twice
        type_name: String,
    },

    /// A value cannot be represented by its field's declared kind.
    #[error("Encoding error in field '{field}': {message}")]
    EncodingError {
        /// Field name (or a description of the value)
        field: String,
        /// Error message
        message: String,
    },

    /// Descriptor failed validation.
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Message type name
        schema_name: String,
        /// Validation error message
        reason: String,
    },

    /// Nested messages exceeded the configured depth.
    #[error("Recursion limit of {depth} exceeded in '{type_name}'")]
    RecursionLimit {
        /// Type being processed when the limit was hit
        type_name: String,
        /// Configured maximum depth
        depth: usize,
    },

    /// The process-wide registry has not been initialized yet.
    #[error("Schema registry is not initialized")]
    RegistryNotReady,

    /// The process-wide registry was initialized twice.
    #[error("Schema registry is already initialized")]
    RegistryAlreadyInitialized,

    /// Configuration could not be loaded or compiled.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },
}

impl CodecError {
    /// Create a malformed varint error.
    pub fn malformed_varint(position: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedVarint {
            position,
            reason: reason.into(),
        }
    }

    /// Create a truncated message error.
    pub fn truncated(length: u64, position: usize, buffer_len: usize) -> Self {
        CodecError::TruncatedMessage {
            length,
            position,
            buffer_len,
        }
    }

    /// Create an unsupported wire type error.
    pub fn unsupported_wire_type(wire_type: u8, position: usize) -> Self {
        CodecError::UnsupportedWireType {
            wire_type,
            position,
        }
    }

    /// Create a missing required field error.
    pub fn missing_required(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::MissingRequiredField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create an "unknown type" error.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        CodecError::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Create a duplicate type error.
    pub fn duplicate_type(type_name: impl Into<String>) -> Self {
        CodecError::DuplicateType {
            type_name: type_name.into(),
        }
    }

    /// Create an encoding error.
    pub fn encoding(field: impl Into<String>, message: impl Into<String>) -> Self {
        CodecError::EncodingError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a recursion limit error.
    pub fn recursion_limit(type_name: impl Into<String>, depth: usize) -> Self {
        CodecError::RecursionLimit {
            type_name: type_name.into(),
            depth,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// True for errors caused by the bytes on the wire rather than by the
    /// caller's schema or record.
    pub fn is_wire_error(&self) -> bool {
        matches!(
            self,
            CodecError::MalformedVarint { .. }
                | CodecError::TruncatedMessage { .. }
                | CodecError::UnsupportedWireType { .. }
                | CodecError::RecursionLimit { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::MalformedVarint { position, reason } => {
                vec![("position", position.to_string()), ("reason", reason.clone())]
            }
            CodecError::TruncatedMessage {
                length,
                position,
                buffer_len,
            } => vec![
                ("length", length.to_string()),
                ("position", position.to_string()),
                ("buffer_len", buffer_len.to_string()),
            ],
            CodecError::UnsupportedWireType {
                wire_type,
                position,
            } => vec![
                ("wire_type", wire_type.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::MissingRequiredField { type_name, field } => {
                vec![("type", type_name.clone()), ("field", field.clone())]
            }
            CodecError::UnknownType { type_name } | CodecError::DuplicateType { type_name } => {
                vec![("type", type_name.clone())]
            }
            CodecError::EncodingError { field, message } => {
                vec![("field", field.clone()), ("message", message.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
            CodecError::RecursionLimit { type_name, depth } => {
                vec![("type", type_name.clone()), ("depth", depth.to_string())]
            }
            CodecError::RegistryNotReady | CodecError::RegistryAlreadyInitialized => Vec::new(),
            CodecError::Config { message } => vec![("message", message.clone())],
        }
    }
}

/// Result type for chatwire operations.
pub type Result<T> = std::result::Result<T, CodecError>;
