// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema command - list and show the built-in message types.

use clap::Subcommand;
use serde::Serialize;

use crate::common::Result;
use chatwire::schema::chat_platform_registry;
use chatwire::MessageDescriptor;

/// Built-in schema operations.
#[derive(Subcommand, Clone, Debug)]
pub enum SchemaCmd {
    /// List all built-in message types
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the fields of a message type
    Show {
        /// Message type name
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl SchemaCmd {
    pub fn run(self) -> Result<()> {
        match self {
            SchemaCmd::List { json } => cmd_list(json),
            SchemaCmd::Show { type_name, json } => cmd_show(&type_name, json),
        }
    }
}

#[derive(Serialize)]
struct FieldSummary<'a> {
    name: &'a str,
    tag: u32,
    kind: String,
    cardinality: &'static str,
    wire_type: &'static str,
}

fn summarize(descriptor: &MessageDescriptor) -> Vec<FieldSummary<'_>> {
    descriptor
        .fields()
        .iter()
        .map(|f| FieldSummary {
            name: &f.name,
            tag: f.tag,
            kind: f.kind.to_string(),
            cardinality: f.cardinality.as_str(),
            wire_type: f.wire_type().as_str(),
        })
        .collect()
}

fn cmd_list(json: bool) -> Result<()> {
    let registry = chat_platform_registry()?;

    if json {
        let names = registry.names();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    for name in registry.names() {
        let descriptor = registry.resolve(name)?;
        println!("{name} ({} fields)", descriptor.field_count());
    }
    Ok(())
}

fn cmd_show(type_name: &str, json: bool) -> Result<()> {
    let registry = chat_platform_registry()?;
    let descriptor = registry.resolve(type_name)?;
    let fields = summarize(descriptor);

    if json {
        let out = serde_json::json!({
            "name": descriptor.name(),
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("message {} {{", descriptor.name());
    for field in &fields {
        println!(
            "  {} {} {} = {};",
            field.cardinality, field.kind, field.name, field.tag
        );
    }
    println!("}}");
    Ok(())
}
