// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec facade tying the schema path and the fallback path together.
//!
//! [`ProtobufCodec`] owns a shared registry and a configuration. Plain
//! [`ProtobufCodec::decode`] is strict and propagates every error.
//! [`ProtobufCodec::decode_with_fallback`] engages the heuristic decoder
//! only when the bytes themselves are the problem, and says so in the
//! returned [`DecodeOutcome`].
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use chatwire::encoding::ProtobufCodec;
//! use chatwire::schema::chat_platform_registry;
//! use chatwire::{record_from_json, CodecValue};
//!
//! let codec = ProtobufCodec::new(Arc::new(chat_platform_registry()?))?;
//! let record = record_from_json(&serde_json::json!({
//!     "status": {"code": 1, "msg": "success"},
//!     "data": {"id": "100001", "name": "Alice"}
//! }));
//!
//! let bytes = codec.encode("UserInfo", &record)?;
//! let outcome = codec.decode_with_fallback("UserInfo", &bytes)?;
//! assert!(!outcome.is_recovered());
//! assert_eq!(
//!     outcome.record()["data"].as_struct().unwrap()["name"],
//!     CodecValue::from("Alice")
//! );
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::warn;

use crate::config::CodecConfig;
use crate::core::{CodecError, CodecValue, Record, Result, SchemaRegistry};
use crate::encoding::decoder::Decoder;
use crate::encoding::encoder::Encoder;
use crate::encoding::fallback::{Confidence, FallbackDecoder, FallbackRecord};
use crate::MessageDecoder;

/// Why a decode went through the fallback path.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// The schema decoder rejected the bytes
    DecodeFailed(CodecError),
    /// The schema decoder succeeded but these required fields were absent
    MissingRequired(Vec<String>),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::DecodeFailed(err) => write!(f, "decode failed: {err}"),
            FallbackReason::MissingRequired(fields) => {
                write!(f, "missing required fields: {}", fields.join(", "))
            }
        }
    }
}

/// Result of [`ProtobufCodec::decode_with_fallback`].
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Decoded by the schema path, every required field present
    Decoded(Record),
    /// Produced (at least in part) by the fallback decoder
    Recovered {
        /// Best-effort record
        record: Record,
        /// What sent the decode to the fallback
        reason: FallbackReason,
        /// How much of the record came from the bytes
        confidence: Confidence,
    },
}

impl DecodeOutcome {
    /// Borrow the record regardless of how it was produced.
    pub fn record(&self) -> &Record {
        match self {
            DecodeOutcome::Decoded(record) | DecodeOutcome::Recovered { record, .. } => record,
        }
    }

    /// Take the record regardless of how it was produced.
    pub fn into_record(self) -> Record {
        match self {
            DecodeOutcome::Decoded(record) | DecodeOutcome::Recovered { record, .. } => record,
        }
    }

    /// Check whether the fallback decoder was involved.
    pub fn is_recovered(&self) -> bool {
        matches!(self, DecodeOutcome::Recovered { .. })
    }
}

/// Schema-driven codec with an optional heuristic fallback.
///
/// Cheap to clone; the registry is shared.
#[derive(Debug, Clone)]
pub struct ProtobufCodec {
    registry: Arc<SchemaRegistry>,
    config: CodecConfig,
    fallback: FallbackDecoder,
}

impl ProtobufCodec {
    /// Create a codec with the default configuration.
    pub fn new(registry: Arc<SchemaRegistry>) -> Result<Self> {
        Self::with_config(registry, CodecConfig::default())
    }

    /// Create a codec with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Config` if an extractor pattern does not compile.
    pub fn with_config(registry: Arc<SchemaRegistry>, config: CodecConfig) -> Result<Self> {
        let fallback = FallbackDecoder::new(&config.fallback)?;
        Ok(Self {
            registry,
            config,
            fallback,
        })
    }

    /// Get the registry this codec resolves types against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Get the active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.registry).with_max_depth(self.config.decoder.max_depth)
    }

    fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.registry).with_max_depth(self.config.decoder.max_depth)
    }

    /// Encode `record` as `type_name`.
    pub fn encode(&self, type_name: &str, record: &Record) -> Result<Vec<u8>> {
        self.encoder().encode(type_name, record)
    }

    /// Decode `data` as `type_name` with the schema path only.
    pub fn decode(&self, type_name: &str, data: &[u8]) -> Result<Record> {
        self.decoder().decode(type_name, data)
    }

    /// Required fields absent from a decoded record.
    pub fn missing_required(&self, type_name: &str, record: &Record) -> Result<Vec<String>> {
        self.decoder().missing_required(type_name, record)
    }

    /// Run only the fallback decoder.
    pub fn recover(&self, data: &[u8]) -> FallbackRecord {
        self.fallback.decode(data)
    }

    /// Decode with the schema path, falling back to the heuristic decoder
    /// when the bytes are malformed or required fields are missing.
    ///
    /// # Errors
    ///
    /// Registry errors such as `UnknownType` are always returned. When the
    /// fallback is disabled, wire errors are returned as well and records
    /// with missing required fields come back as [`DecodeOutcome::Decoded`].
    pub fn decode_with_fallback(&self, type_name: &str, data: &[u8]) -> Result<DecodeOutcome> {
        self.registry.resolve(type_name)?;
        let enabled = self.config.fallback.enabled;

        match self.decode(type_name, data) {
            Ok(record) => {
                let missing = self.missing_required(type_name, &record)?;
                if missing.is_empty() || !enabled {
                    return Ok(DecodeOutcome::Decoded(record));
                }
                warn!(
                    type_name,
                    missing = ?missing,
                    "decoded record lacks required fields, engaging fallback"
                );
                let recovered = self.fallback.decode(data);
                // structural values came from the bytes as well
                let confidence = if record.is_empty() {
                    recovered.confidence
                } else {
                    Confidence::Partial
                };
                let mut merged = recovered.record;
                overlay(&mut merged, record);
                Ok(DecodeOutcome::Recovered {
                    record: merged,
                    reason: FallbackReason::MissingRequired(missing),
                    confidence,
                })
            }
            Err(err) if err.is_wire_error() && enabled => {
                warn!(
                    type_name,
                    error = %err,
                    fields = ?err.log_fields(),
                    "schema decode failed, engaging fallback"
                );
                let recovered = self.fallback.decode(data);
                Ok(DecodeOutcome::Recovered {
                    record: recovered.record,
                    reason: FallbackReason::DecodeFailed(err),
                    confidence: recovered.confidence,
                })
            }
            Err(err) => Err(err),
        }
    }
}

impl MessageDecoder for ProtobufCodec {
    fn decode_message(&self, type_name: &str, data: &[u8]) -> Result<Record> {
        self.decode_with_fallback(type_name, data)
            .map(DecodeOutcome::into_record)
    }

    fn is_best_effort(&self) -> bool {
        self.config.fallback.enabled
    }
}

/// Lay `top` over `base`: nested records merge, any other value in `top`
/// replaces the one in `base`.
fn overlay(base: &mut Record, top: Record) {
    for (key, value) in top {
        let value = match (base.get_mut(&key), value) {
            (Some(CodecValue::Struct(existing)), CodecValue::Struct(incoming)) => {
                overlay(existing, incoming);
                continue;
            }
            (_, value) => value,
        };
        base.insert(key, value);
    }
}

/// Check whether an envelope record reports success (`status.code == 1`).
pub fn is_success(record: &Record) -> bool {
    status_field(record, "code").and_then(CodecValue::as_i64) == Some(1)
}

/// The status message of an envelope record that does not report success.
pub fn error_message(record: &Record) -> Option<&str> {
    if is_success(record) {
        return None;
    }
    status_field(record, "msg").and_then(CodecValue::as_str)
}

fn status_field<'a>(record: &'a Record, name: &str) -> Option<&'a CodecValue> {
    record.get("status")?.as_struct()?.get(name)
}
