// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Best-effort decoder for payloads the schema path cannot handle.
//!
//! The fallback never fails. It walks the wire grammar without a
//! descriptor, assumes the response envelope (`status = 1`, `data = 2`),
//! flattens every `data` payload into text leaves and runs pattern
//! extractors over them. Keys with no match are left out; nothing is
//! invented. If nothing at all can be recovered the record is the default
//! envelope `{status: {code, msg}, data: {}}` from configuration.
//!
//! Callers should reach for this only after the schema decoder has failed
//! or produced a record missing required fields.

use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::config::FallbackConfig;
use crate::core::{CodecError, CodecValue, Record, Result};
use crate::encoding::cursor::{printable_text, WireEntry, WireReader, WireValue};
use crate::MessageDecoder;

/// Envelope field carrying the status message.
const STATUS_TAG: u32 = 1;
/// Envelope field carrying the payload.
const DATA_TAG: u32 = 2;
/// Status message fields.
const STATUS_CODE_TAG: u32 = 2;
const STATUS_MSG_TAG: u32 = 3;
/// Nested payloads deeper than this are taken as text.
const MAX_TEXT_DEPTH: usize = 16;

/// How much of a fallback record came from the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// Some values were recovered from the payload
    Partial,
    /// Nothing was recovered; the record is the configured default
    Default,
}

impl Confidence {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Partial => "partial",
            Confidence::Default => "default",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of [`FallbackDecoder::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackRecord {
    /// Recovered envelope
    pub record: Record,
    /// How much of it came from the payload
    pub confidence: Confidence,
}

#[derive(Debug, Clone)]
struct Extractor {
    key: String,
    pattern: Regex,
}

impl Extractor {
    /// Capture group 1 if the pattern has one, else the whole match.
    fn extract(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    }
}

/// Schema-free, pattern-driven decoder.
#[derive(Debug, Clone)]
pub struct FallbackDecoder {
    extractors: Vec<Extractor>,
    default_code: i32,
    default_msg: String,
}

impl FallbackDecoder {
    /// Compile the configured extractors.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Config` if a pattern is not a valid regex.
    pub fn new(config: &FallbackConfig) -> Result<Self> {
        let extractors = config
            .extractors
            .iter()
            .map(|e| {
                let pattern = Regex::new(&e.pattern).map_err(|err| {
                    CodecError::config(format!(
                        "invalid pattern for extractor '{}': {err}",
                        e.key
                    ))
                })?;
                Ok(Extractor {
                    key: e.key.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extractors,
            default_code: config.default_code,
            default_msg: config.default_msg.clone(),
        })
    }

    /// Envelope returned when nothing can be recovered.
    pub fn default_record(&self) -> Record {
        Record::from([
            ("status".to_string(), self.status_value(None, None)),
            ("data".to_string(), CodecValue::Struct(Record::new())),
        ])
    }

    /// Recover what can be recovered from `data`.
    pub fn decode(&self, data: &[u8]) -> FallbackRecord {
        let (entries, complete) = walk(data);
        if !complete {
            debug!(
                recovered_entries = entries.len(),
                "fallback walk stopped at malformed field"
            );
        }

        let mut status = None;
        let mut items = Vec::new();
        for entry in entries {
            match (entry.tag, entry.value) {
                (STATUS_TAG, WireValue::Bytes(bytes)) if status.is_none() => {
                    status = recover_status(bytes);
                }
                (DATA_TAG, WireValue::Bytes(bytes)) => items.push(self.extract(bytes)),
                _ => {}
            }
        }

        let recovered = status.is_some() || items.iter().any(|item| !item.is_empty());
        let (code, msg) = status.unwrap_or((None, None));

        let data = match items.len() {
            0 => CodecValue::Struct(Record::new()),
            1 => CodecValue::Struct(items.remove(0)),
            _ => CodecValue::Array(items.into_iter().map(CodecValue::Struct).collect()),
        };

        FallbackRecord {
            record: Record::from([
                ("status".to_string(), self.status_value(code, msg)),
                ("data".to_string(), data),
            ]),
            confidence: if recovered {
                Confidence::Partial
            } else {
                Confidence::Default
            },
        }
    }

    fn status_value(&self, code: Option<i32>, msg: Option<String>) -> CodecValue {
        CodecValue::Struct(Record::from([
            (
                "code".to_string(),
                CodecValue::Int32(code.unwrap_or(self.default_code)),
            ),
            (
                "msg".to_string(),
                CodecValue::String(msg.unwrap_or_else(|| self.default_msg.clone())),
            ),
        ]))
    }

    /// Run every extractor over the text leaves of one payload; the first
    /// leaf matching an extractor fills its key.
    fn extract(&self, payload: &[u8]) -> Record {
        let mut leaves = Vec::new();
        collect_text(payload, 0, &mut leaves);

        let mut record = Record::new();
        for extractor in &self.extractors {
            if record.contains_key(&extractor.key) {
                continue;
            }
            if let Some(value) = leaves.iter().find_map(|leaf| extractor.extract(leaf)) {
                record.insert(extractor.key.clone(), CodecValue::String(value));
            }
        }
        record
    }
}

impl MessageDecoder for FallbackDecoder {
    /// The type name is ignored; every payload is read as an envelope.
    fn decode_message(&self, _type_name: &str, data: &[u8]) -> Result<Record> {
        Ok(self.decode(data).record)
    }

    fn is_best_effort(&self) -> bool {
        true
    }
}

/// Read entries until the buffer ends or a field is malformed.
///
/// The flag is true when the whole buffer was consumed.
fn walk(data: &[u8]) -> (Vec<WireEntry<'_>>, bool) {
    let mut entries = Vec::new();
    for entry in WireReader::new(data).entries() {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(_) => return (entries, false),
        }
    }
    (entries, true)
}

/// `(code, msg)` from a status payload, if either is present.
fn recover_status(payload: &[u8]) -> Option<(Option<i32>, Option<String>)> {
    let (entries, _) = walk(payload);
    let mut code = None;
    let mut msg = None;
    for entry in entries {
        match (entry.tag, entry.value) {
            (STATUS_CODE_TAG, WireValue::Varint(v)) => code = Some(v as i32),
            (STATUS_MSG_TAG, WireValue::Bytes(bytes)) => {
                msg = Some(String::from_utf8_lossy(bytes).into_owned());
            }
            _ => {}
        }
    }
    (code.is_some() || msg.is_some()).then_some((code, msg))
}

/// Flatten a payload into text leaves.
///
/// A payload that reads as a complete message is descended into first; if
/// it is also printable the whole text follows as a trailing leaf, since
/// short strings can pass for wire entries. Otherwise printable UTF-8 is a
/// leaf, a payload with some entries before a malformed field is descended
/// into, and the rest is taken lossily.
fn collect_text(payload: &[u8], depth: usize, leaves: &mut Vec<String>) {
    if payload.is_empty() {
        return;
    }
    let (entries, complete) = if depth < MAX_TEXT_DEPTH {
        walk(payload)
    } else {
        (Vec::new(), false)
    };
    let text = printable_text(payload);

    if complete && !entries.is_empty() {
        descend(&entries, depth, leaves);
        if let Some(text) = text {
            leaves.push(text.to_string());
        }
    } else if let Some(text) = text {
        leaves.push(text.to_string());
    } else if !entries.is_empty() {
        descend(&entries, depth, leaves);
    } else {
        leaves.push(String::from_utf8_lossy(payload).into_owned());
    }
}

fn descend(entries: &[WireEntry<'_>], depth: usize, leaves: &mut Vec<String>) {
    for entry in entries {
        if let WireValue::Bytes(nested) = entry.value {
            collect_text(nested, depth + 1, leaves);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::encoding::writer::WireWriter;

    fn decoder() -> FallbackDecoder {
        FallbackDecoder::new(&FallbackConfig::default()).unwrap()
    }

    fn status(code: u64, msg: &str) -> WireWriter {
        let mut writer = WireWriter::new();
        writer.write_varint_field(STATUS_CODE_TAG, code);
        writer.write_string_field(STATUS_MSG_TAG, msg);
        writer
    }

    #[test]
    fn test_garbage_gives_default_record() {
        let decoder = decoder();
        let result = decoder.decode(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(result.confidence, Confidence::Default);
        assert_eq!(result.record, decoder.default_record());
    }

    #[test]
    fn test_empty_input_gives_default_record() {
        let decoder = decoder();
        let result = decoder.decode(&[]);
        assert_eq!(result.confidence, Confidence::Default);
        let status = result.record["status"].as_struct().unwrap();
        assert_eq!(status["code"], CodecValue::Int32(1));
        assert_eq!(status["msg"], CodecValue::from("success"));
        assert_eq!(result.record["data"], CodecValue::Struct(Record::new()));
    }

    #[test]
    fn test_status_recovered() {
        let mut writer = WireWriter::new();
        writer.write_message_field(STATUS_TAG, &status(0, "token expired"));
        let result = decoder().decode(&writer.finish());
        assert_eq!(result.confidence, Confidence::Partial);
        let status = result.record["status"].as_struct().unwrap();
        assert_eq!(status["code"], CodecValue::Int32(0));
        assert_eq!(status["msg"], CodecValue::from("token expired"));
    }

    #[test]
    fn test_extracts_profile_fields() {
        let mut profile = WireWriter::new();
        profile.write_string_field(1, "12345678");
        profile.write_string_field(2, "张三");
        profile.write_string_field(4, "https://cdn.example.com/a/b.png");
        profile.write_string_field(6, "13812345678");
        profile.write_string_field(7, "zhang@example.com");

        let mut writer = WireWriter::new();
        writer.write_message_field(STATUS_TAG, &status(1, "success"));
        writer.write_message_field(DATA_TAG, &profile);
        let result = decoder().decode(&writer.finish());

        let data = result.record["data"].as_struct().unwrap();
        assert_eq!(data["id"], CodecValue::from("12345678"));
        assert_eq!(data["name"], CodecValue::from("张三"));
        assert_eq!(
            data["avatar_url"],
            CodecValue::from("https://cdn.example.com/a/b.png")
        );
        assert_eq!(data["phone"], CodecValue::from("13812345678"));
        assert_eq!(data["email"], CodecValue::from("zhang@example.com"));
    }

    #[test]
    fn test_no_placeholders_for_unmatched_keys() {
        let mut payload = WireWriter::new();
        payload.write_string_field(1, "hello");
        let mut writer = WireWriter::new();
        writer.write_message_field(DATA_TAG, &payload);
        let result = decoder().decode(&writer.finish());
        assert_eq!(result.record["data"], CodecValue::Struct(Record::new()));
        assert_eq!(result.confidence, Confidence::Default);
    }

    #[test]
    fn test_repeated_data_becomes_array() {
        let mut writer = WireWriter::new();
        for id in ["100001", "100002", "100003"] {
            let mut item = WireWriter::new();
            item.write_string_field(1, id);
            writer.write_message_field(DATA_TAG, &item);
        }
        let result = decoder().decode(&writer.finish());
        let items = result.record["data"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[2].as_struct().unwrap()["id"],
            CodecValue::from("100003")
        );
    }

    #[test]
    fn test_keeps_entries_before_corruption() {
        let mut item = WireWriter::new();
        item.write_string_field(7, "a@b.io");
        let mut writer = WireWriter::new();
        writer.write_message_field(DATA_TAG, &item);
        let mut bytes = writer.finish();
        // length-delimited field claiming more bytes than remain
        bytes.extend_from_slice(&[0x1A, 0x7F, b'x']);

        let result = decoder().decode(&bytes);
        assert_eq!(result.confidence, Confidence::Partial);
        assert_eq!(
            result.record["data"].as_struct().unwrap()["email"],
            CodecValue::from("a@b.io")
        );
    }

    #[test]
    fn test_nested_walk_stops_at_unsupported_field() {
        let mut profile = WireWriter::new();
        profile.write_string_field(7, "li@example.com");
        let mut payload = profile.finish();
        // fixed64 field right after the email
        payload.push(0x41);
        payload.extend_from_slice(&9.5f64.to_le_bytes());

        let mut writer = WireWriter::new();
        writer.write_length_delimited(DATA_TAG, &payload);
        let result = decoder().decode(&writer.finish());
        assert_eq!(
            result.record["data"].as_struct().unwrap()["email"],
            CodecValue::from("li@example.com")
        );
    }

    #[test]
    fn test_custom_extractor_and_defaults() {
        let config = FallbackConfig {
            default_code: 0,
            default_msg: "unavailable".to_string(),
            extractors: vec![ExtractorConfig::new("ticket", r"T-(\d+)")],
            ..FallbackConfig::default()
        };
        let decoder = FallbackDecoder::new(&config).unwrap();

        let mut item = WireWriter::new();
        item.write_string_field(3, "ref T-42 open");
        let mut writer = WireWriter::new();
        writer.write_message_field(DATA_TAG, &item);
        let result = decoder.decode(&writer.finish());

        assert_eq!(
            result.record["data"].as_struct().unwrap()["ticket"],
            CodecValue::from("42")
        );
        let status = result.record["status"].as_struct().unwrap();
        assert_eq!(status["code"], CodecValue::Int32(0));
        assert_eq!(status["msg"], CodecValue::from("unavailable"));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let config = FallbackConfig {
            extractors: vec![ExtractorConfig::new("broken", "(unclosed")],
            ..FallbackConfig::default()
        };
        assert!(matches!(
            FallbackDecoder::new(&config),
            Err(CodecError::Config { .. })
        ));
    }

    #[test]
    fn test_ids_behind_printable_framing() {
        // lengths 9, 10 and 13 encode as \t, \n and \r
        for id in ["123456789", "1234567890", "1234567890123"] {
            let mut item = WireWriter::new();
            item.write_string_field(1, id);
            let mut writer = WireWriter::new();
            writer.write_message_field(STATUS_TAG, &status(1, "success"));
            writer.write_message_field(DATA_TAG, &item);
            let result = decoder().decode(&writer.finish());

            let data = result.record["data"].as_struct().unwrap();
            assert_eq!(data.get("id"), Some(&CodecValue::from(id)), "id {id}");
        }
    }

    #[test]
    fn test_long_printable_framing_descended() {
        // a 32-byte string encodes its length as a space
        let id = "12345678901234567890123456789012";
        let mut item = WireWriter::new();
        item.write_string_field(1, id);
        let mut writer = WireWriter::new();
        writer.write_message_field(DATA_TAG, &item);
        let result = decoder().decode(&writer.finish());

        let data = result.record["data"].as_struct().unwrap();
        assert_eq!(data["id"], CodecValue::from(id));
        assert_eq!(result.confidence, Confidence::Partial);
    }

    #[test]
    fn test_short_text_that_parses_as_entries_kept() {
        // "hi" reads as field 13 = varint 0x69
        let mut leaves = Vec::new();
        collect_text(b"hi", 0, &mut leaves);
        assert_eq!(leaves, ["hi"]);
    }
}
