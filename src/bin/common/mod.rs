// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::Read as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use chatwire::schema::chat_platform_registry;
use chatwire::{CodecConfig, ProtobufCodec};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the `-v` count when set.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose)));
    // a second install (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Load the codec configuration, or the defaults without a path.
pub fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    match path {
        Some(path) => Ok(CodecConfig::from_file(path)?),
        None => Ok(CodecConfig::default()),
    }
}

/// Build a codec over the built-in chat-platform schemas.
pub fn build_codec(config: CodecConfig) -> Result<ProtobufCodec> {
    let registry = chat_platform_registry()?;
    Ok(ProtobufCodec::with_config(Arc::new(registry), config)?)
}

/// Read raw bytes from a file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Read a payload, decoding it from hex text when `hex` is set.
pub fn read_payload(path: &Path, hex: bool) -> Result<Vec<u8>> {
    let raw = read_input(path)?;
    if !hex {
        return Ok(raw);
    }
    let text = String::from_utf8(raw).context("hex input is not UTF-8")?;
    parse_hex(&text)
}

/// Decode hex text, ignoring whitespace.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact).context("invalid hex input")
}
