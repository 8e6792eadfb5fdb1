// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - JSON record to payload bytes.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Args;

use crate::common::{build_codec, read_input, Result};
use chatwire::{record_from_json, CodecConfig};

/// Encode a JSON object as a message type.
#[derive(Args, Clone, Debug)]
pub struct EncodeCmd {
    /// Message type name
    #[arg(value_name = "TYPE")]
    type_name: String,

    /// JSON file holding one object (`-` for stdin)
    #[arg(value_name = "JSON_FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Write hex text instead of raw bytes
    #[arg(long)]
    hex: bool,
}

impl EncodeCmd {
    pub fn run(self, config: CodecConfig) -> Result<()> {
        let codec = build_codec(config)?;

        let text = read_input(&self.input)?;
        let json: serde_json::Value =
            serde_json::from_slice(&text).context("input is not valid JSON")?;
        if !json.is_object() {
            bail!("input must be a JSON object, got {}", json_kind(&json));
        }

        let bytes = codec.encode(&self.type_name, &record_from_json(&json))?;
        let out = if self.hex {
            let mut text = hex::encode(&bytes).into_bytes();
            text.push(b'\n');
            text
        } else {
            bytes
        };

        match self.output {
            Some(path) => std::fs::write(&path, &out)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&out)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
