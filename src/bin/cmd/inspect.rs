// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - schema-free dump of wire entries.

use std::path::PathBuf;

use clap::Args;

use crate::common::{read_payload, Result};
use chatwire::encoding::{is_message, printable_text, WireReader, WireValue};

/// Nested payloads are not expanded past this depth.
const MAX_DEPTH: usize = 16;

/// Dump the `(tag, wire type, value)` entries of a payload.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Input file (`-` for stdin)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Input is hex text
    #[arg(long)]
    hex: bool,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let data = read_payload(&self.input, self.hex)?;
        println!("{} bytes", data.len());
        dump(&data, 0)
    }
}

fn dump(data: &[u8], depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);
    for entry in WireReader::new(data).entries() {
        let entry = entry?;
        match entry.value {
            WireValue::Varint(v) => {
                println!("{indent}@{} #{} varint = {v}", entry.position, entry.tag);
            }
            WireValue::Bytes(bytes) => {
                print!(
                    "{indent}@{} #{} length-delimited [{}]",
                    entry.position,
                    entry.tag,
                    bytes.len()
                );
                let nested = depth < MAX_DEPTH && is_message(bytes);
                match (nested, printable_text(bytes)) {
                    // short text can also read as wire entries; show both
                    (true, Some(text)) => {
                        println!(" = {text:?} {{");
                        dump(bytes, depth + 1)?;
                        println!("{indent}}}");
                    }
                    (true, None) => {
                        println!(" {{");
                        dump(bytes, depth + 1)?;
                        println!("{indent}}}");
                    }
                    (false, Some(text)) => println!(" = {text:?}"),
                    (false, None) => println!(" = 0x{}", hex::encode(bytes)),
                }
            }
        }
    }
    Ok(())
}
