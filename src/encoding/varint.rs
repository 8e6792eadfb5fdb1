// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Base-128 varint encoding.
//!
//! 7 bits per byte, low-order group first, high bit set on every byte but
//! the last. A `u64` needs at most 10 bytes.

use crate::core::{CodecError, Result};

/// Longest legal varint, in bytes.
pub const MAX_VARINT_LEN: usize = 10;

/// Append the varint encoding of `value` to `buf`.
///
/// Infallible: every `u64` fits in [`MAX_VARINT_LEN`] bytes.
#[inline]
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Varint encoding of `value` as a fresh vector.
pub fn varint_bytes(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(value));
    encode_varint(value, &mut buf);
    buf
}

/// Number of bytes [`encode_varint`] writes for `value`.
#[inline]
pub fn encoded_len(value: u64) -> usize {
    // ceil(significant_bits / 7), with 0 taking one byte
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decode a varint starting at `offset`.
///
/// Returns `(value, bytes_consumed)`.
///
/// # Errors
///
/// `CodecError::MalformedVarint` when the buffer ends before a terminating
/// byte, when the varint runs past 10 bytes, or when the 10th byte carries
/// bits beyond the 64th.
pub fn decode_varint(data: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value: u64 = 0;

    for i in 0..MAX_VARINT_LEN {
        let Some(&byte) = data.get(offset + i) else {
            return Err(CodecError::malformed_varint(
                offset,
                "buffer ended before varint terminated",
            ));
        };

        if i == MAX_VARINT_LEN - 1 {
            if byte & 0x80 != 0 {
                return Err(CodecError::malformed_varint(
                    offset,
                    "varint longer than 10 bytes",
                ));
            }
            if byte > 0x01 {
                return Err(CodecError::malformed_varint(
                    offset,
                    "varint overflows 64 bits",
                ));
            }
        }

        value |= u64::from(byte & 0x7F) << (7 * i);

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    unreachable!("10th varint byte always terminates or errors")
}
