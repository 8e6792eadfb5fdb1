// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - payload bytes to JSON.

use std::path::PathBuf;

use clap::Args;

use crate::common::{build_codec, read_payload, Result};
use chatwire::encoding::DecodeOutcome;
use chatwire::{record_to_json, CodecConfig};

/// Decode a payload as a message type.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Message type name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// Input file (`-` for stdin)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Input is hex text
    #[arg(long)]
    hex: bool,

    /// Recover a best-effort record when schema decoding fails
    #[arg(long)]
    fallback: bool,
}

impl DecodeCmd {
    pub fn run(self, config: CodecConfig) -> Result<()> {
        let codec = build_codec(config)?;
        let data = read_payload(&self.input, self.hex)?;

        let record = if self.fallback {
            match codec.decode_with_fallback(&self.type_name, &data)? {
                DecodeOutcome::Decoded(record) => record,
                DecodeOutcome::Recovered {
                    record,
                    reason,
                    confidence,
                } => {
                    eprintln!("recovered ({confidence} confidence): {reason}");
                    record
                }
            }
        } else {
            codec.decode(&self.type_name, &data)?
        };

        println!("{}", serde_json::to_string_pretty(&record_to_json(&record))?);
        Ok(())
    }
}
