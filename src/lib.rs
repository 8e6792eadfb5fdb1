// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Chatwire
//!
//! Schema-driven binary codec for a protobuf-style chat wire protocol.
//!
//! The library turns loosely-typed [`Record`]s into wire bytes and back,
//! guided by message descriptors held in a frozen [`SchemaRegistry`]:
//! - **Schema model** in [`schema`] (fields, descriptors, built-in chat types)
//! - **Registry** in [`core::registry`] (build once, share read-only)
//! - **Wire codec** in [`encoding`] (varints, reader/writer, encoder, decoder)
//! - **Fallback** in [`encoding::fallback`] for payloads the schema cannot read
//! - **Configuration** in [`config`] (TOML)
//!
//! ## Architecture
//!
//! - `core/` - Errors, record values, registry
//! - `schema/` - Field and message descriptors, built-in chat-platform types
//! - `encoding/` - Wire primitives, encoder, decoder, fallback, codec facade
//! - `config.rs` - Decoder and fallback settings
//!
//! ## Example: Round trip
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use chatwire::schema::{FieldKind, MessageDescriptor, ScalarType};
//! use chatwire::{record_from_json, Decoder, Encoder, SchemaRegistry};
//!
//! let mut builder = SchemaRegistry::builder();
//! builder
//!     .register(
//!         MessageDescriptor::builder("Status")
//!             .required("code", 2, ScalarType::Int32)
//!             .required("msg", 3, ScalarType::String)
//!             .build()?,
//!     )?
//!     .register(
//!         MessageDescriptor::builder("Wrapper")
//!             .required("status", 1, FieldKind::message("Status"))
//!             .build()?,
//!     )?;
//! let registry = builder.freeze();
//!
//! let record = record_from_json(&serde_json::json!({
//!     "status": {"code": 1, "msg": "success"}
//! }));
//! let bytes = Encoder::new(&registry).encode("Wrapper", &record)?;
//! let decoded = Decoder::new(&registry).decode("Wrapper", &bytes)?;
//! assert_eq!(decoded["status"].as_struct().unwrap()["msg"].as_str(), Some("success"));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{record_from_json, record_to_json, CodecError, CodecValue, Record, Result, WireType};
pub use core::{SchemaRegistry, SchemaRegistryBuilder};

// Configuration
pub mod config;

pub use config::CodecConfig;

// Encoding/decoding
pub mod encoding;

pub use encoding::{DecodeOutcome, Decoder, Encoder, FallbackDecoder, ProtobufCodec};

// Schema model
pub mod schema;

pub use schema::{Field, FieldKind, MessageDescriptor, ScalarType};

/// Decoder trait for turning wire bytes into records.
///
/// Implemented by the strict [`Decoder`], the heuristic [`FallbackDecoder`]
/// and the [`ProtobufCodec`] facade, so transports can hold any of them as
/// `Box<dyn MessageDecoder>`.
pub trait MessageDecoder: Send + Sync {
    /// Decode `data` as message type `type_name`.
    fn decode_message(&self, type_name: &str, data: &[u8]) -> Result<Record>;

    /// Whether results may be guesses rather than faithful decodes.
    fn is_best_effort(&self) -> bool {
        false
    }
}

/// Encode with the process-wide registry.
///
/// # Errors
///
/// `RegistryNotReady` before [`core::registry::initialize`] has run, plus
/// every error of [`Encoder::encode`].
pub fn encode(type_name: &str, record: &Record) -> Result<Vec<u8>> {
    Encoder::new(core::registry::global()?).encode(type_name, record)
}

/// Decode with the process-wide registry.
///
/// # Errors
///
/// `RegistryNotReady` before [`core::registry::initialize`] has run, plus
/// every error of [`Decoder::decode`].
pub fn decode(type_name: &str, data: &[u8]) -> Result<Record> {
    Decoder::new(core::registry::global()?).decode(type_name, data)
}
