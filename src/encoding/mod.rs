// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire encoding and decoding.
//!
//! This module is layered bottom-up:
//! - [`varint`] - Base-128 varint codec
//! - [`cursor`] / [`writer`] - Field-level wire reader and writer
//! - [`encoder`] / [`decoder`] - Schema-driven record codec
//! - [`fallback`] - Schema-free heuristic recovery
//! - [`codec`] - Facade combining the schema path and the fallback

pub mod codec;
pub mod cursor;
pub mod decoder;
pub mod encoder;
pub mod fallback;
pub mod varint;
pub mod writer;

pub use codec::{error_message, is_success, DecodeOutcome, FallbackReason, ProtobufCodec};
pub use cursor::{is_message, printable_text, WireEntry, WireReader, WireValue};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use fallback::{Confidence, FallbackDecoder, FallbackRecord};
pub use varint::{decode_varint, encode_varint};
pub use writer::WireWriter;
