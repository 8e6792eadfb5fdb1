// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Chatwire CLI
//!
//! Command-line tool for chat wire payloads.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a response body against a built-in type
//! chatwire decode UserInfo body.bin
//!
//! # Decode a hex dump, recovering what can be recovered on failure
//! chatwire decode ConversationList body.hex --hex --fallback
//!
//! # Encode a JSON record
//! chatwire encode SendMessage message.json -o body.bin
//!
//! # Dump wire entries without a schema
//! chatwire inspect body.bin
//!
//! # List built-in message types
//! chatwire schema list
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{DecodeCmd, EncodeCmd, InspectCmd, SchemaCmd};
use common::Result;

/// Chatwire - chat wire protocol toolkit
///
/// Encode, decode and inspect protobuf-style chat payloads using the
/// built-in message schemas.
#[derive(Parser, Clone)]
#[command(name = "chatwire")]
#[command(about = "Encode, decode and inspect protobuf-style chat payloads", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Codec configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Decode a payload into JSON
    Decode(DecodeCmd),

    /// Encode a JSON record into a payload
    Encode(EncodeCmd),

    /// Dump wire entries without a schema
    Inspect(InspectCmd),

    /// Built-in schema operations (list, show)
    #[command(subcommand)]
    Schema(SchemaCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.verbose);

    let config = common::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode(cmd) => cmd.run(config),
        Commands::Encode(cmd) => cmd.run(config),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
