// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use chatwire::schema::{chat_platform_registry, FieldKind, MessageDescriptor, ScalarType};
use chatwire::{record_from_json, CodecValue, Record, SchemaRegistry};

// ============================================================================
// Registries
// ============================================================================

/// `Status{code: int32 = 2, msg: string = 3}` and `Wrapper{status: Status = 1}`.
pub fn status_wrapper_registry() -> SchemaRegistry {
    let mut builder = SchemaRegistry::builder();
    builder
        .register(
            MessageDescriptor::builder("Status")
                .required("code", 2, ScalarType::Int32)
                .required("msg", 3, ScalarType::String)
                .build()
                .unwrap(),
        )
        .unwrap()
        .register(
            MessageDescriptor::builder("Wrapper")
                .required("status", 1, FieldKind::message("Status"))
                .build()
                .unwrap(),
        )
        .unwrap();
    builder.freeze()
}

/// The built-in chat-platform registry.
pub fn chat_registry() -> SchemaRegistry {
    chat_platform_registry().unwrap()
}

// ============================================================================
// Records
// ============================================================================

/// Build a record from a JSON object literal.
pub fn record(json: serde_json::Value) -> Record {
    record_from_json(&json)
}

/// A conversation list with `count` entries.
pub fn conversation_list(count: usize) -> Record {
    let entries: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "chat_id": format!("chat-{i}"),
                "chat_type": (i % 3) + 1,
                "name": format!("Group {i}"),
                "chat_content": format!("last message {i}"),
                "timestamp_ms": 1_700_000_000_000u64 + i as u64,
                "unread_message": i,
                "at_data": {
                    "mentioned_id": format!("user-{i}"),
                    "msg_seq": 10 + i,
                },
            })
        })
        .collect();

    record(serde_json::json!({
        "status": {"code": 1, "msg": "success"},
        "data": entries,
        "total": count,
    }))
}

// ============================================================================
// Assertions
// ============================================================================

/// Walk a dotted path (`a.b.c`, with `[i]` for array elements).
pub fn get_path<'a>(record: &'a Record, path: &str) -> Option<&'a CodecValue> {
    let mut segments = path.split('.');
    let mut current = lookup_segment(record, segments.next()?)?;
    for segment in segments {
        current = lookup_segment(current.as_struct()?, segment)?;
    }
    Some(current)
}

fn lookup_segment<'a>(record: &'a Record, segment: &str) -> Option<&'a CodecValue> {
    match segment.split_once('[') {
        Some((key, index)) => {
            let index: usize = index.strip_suffix(']')?.parse().ok()?;
            record.get(key)?.as_array()?.get(index)
        }
        None => record.get(segment),
    }
}

/// Assert that `path` holds a string equal to `expected`.
pub fn assert_str(record: &Record, path: &str, expected: &str) {
    let value = get_path(record, path).unwrap_or_else(|| panic!("missing {path}"));
    assert_eq!(value.as_str(), Some(expected), "at {path}");
}

/// Assert that `path` holds an integer equal to `expected`.
pub fn assert_int(record: &Record, path: &str, expected: i64) {
    let value = get_path(record, path).unwrap_or_else(|| panic!("missing {path}"));
    assert_eq!(value.as_i64(), Some(expected), "at {path}");
}
