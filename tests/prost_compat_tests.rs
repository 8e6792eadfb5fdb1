// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Cross-compatibility with prost-generated messages.
//!
//! Integer, string and nested-message fields share protobuf's wire format,
//! so bytes flow both ways between this codec and prost.

mod common;

use chatwire::{CodecError, CodecValue, Decoder, Encoder, ProtobufCodec};
use common::{assert_int, assert_str, chat_registry, record};
use prost::Message;
use serde_json::json;

#[derive(Clone, PartialEq, Message)]
struct Status {
    #[prost(uint64, optional, tag = "1")]
    number: Option<u64>,
    #[prost(int32, tag = "2")]
    code: i32,
    #[prost(string, tag = "3")]
    msg: String,
}

#[derive(Clone, PartialEq, Message)]
struct AtData {
    #[prost(string, tag = "2")]
    mentioned_id: String,
    #[prost(uint64, tag = "8")]
    msg_seq: u64,
}

#[derive(Clone, PartialEq, Message)]
struct ConversationData {
    #[prost(string, tag = "1")]
    chat_id: String,
    #[prost(uint64, tag = "2")]
    chat_type: u64,
    #[prost(string, tag = "3")]
    name: String,
    #[prost(uint64, tag = "5")]
    timestamp_ms: u64,
    #[prost(message, optional, tag = "14")]
    at_data: Option<AtData>,
}

#[derive(Clone, PartialEq, Message)]
struct ConversationList {
    #[prost(message, optional, tag = "1")]
    status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    data: Vec<ConversationData>,
    #[prost(uint64, tag = "3")]
    total: u64,
    #[prost(string, tag = "99")]
    server_trace: String,
}

#[derive(Clone, PartialEq, Message)]
struct UserInfoData {
    #[prost(string, tag = "1")]
    id: String,
    #[prost(string, tag = "2")]
    name: String,
    #[prost(string, tag = "7")]
    email: String,
    #[prost(double, tag = "8")]
    coin: f64,
}

#[derive(Clone, PartialEq, Message)]
struct UserInfo {
    #[prost(message, optional, tag = "1")]
    status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    data: Option<UserInfoData>,
}

fn prost_conversation_list() -> ConversationList {
    ConversationList {
        status: Some(Status {
            number: Some(3),
            code: 1,
            msg: "success".to_string(),
        }),
        data: (0..3u64)
            .map(|i| ConversationData {
                chat_id: format!("chat-{i}"),
                chat_type: i + 1,
                name: format!("群聊 {i}"),
                timestamp_ms: 1_700_000_000_000 + i,
                at_data: Some(AtData {
                    mentioned_id: format!("user-{i}"),
                    msg_seq: 100 + i,
                }),
            })
            .collect(),
        total: 3,
        server_trace: "abc123".to_string(),
    }
}

#[test]
fn test_decode_prost_bytes() {
    let registry = chat_registry();
    let bytes = prost_conversation_list().encode_to_vec();

    let decoded = Decoder::new(&registry)
        .decode("ConversationList", &bytes)
        .unwrap();

    assert_int(&decoded, "status.code", 1);
    assert_int(&decoded, "status.number", 3);
    assert_str(&decoded, "status.msg", "success");
    assert_int(&decoded, "total", 3);
    for i in 0..3 {
        assert_str(&decoded, &format!("data[{i}].name"), &format!("群聊 {i}"));
        assert_int(&decoded, &format!("data[{i}].at_data.msg_seq"), 100 + i);
    }
    // tag 99 is not in the schema
    assert!(!decoded.contains_key("server_trace"));
}

#[test]
fn test_prost_decodes_our_bytes() {
    let registry = chat_registry();
    let input = record(json!({
        "status": {"number": 3, "code": 1, "msg": "success"},
        "data": [
            {
                "chat_id": "chat-0",
                "chat_type": 1,
                "name": "群聊 0",
                "timestamp_ms": 1_700_000_000_000u64,
                "at_data": {"mentioned_id": "user-0", "msg_seq": 100}
            },
            {
                "chat_id": "chat-1",
                "chat_type": 2,
                "name": "群聊 1",
                "timestamp_ms": 1_700_000_000_001u64,
                "at_data": {"mentioned_id": "user-1", "msg_seq": 101}
            },
            {
                "chat_id": "chat-2",
                "chat_type": 3,
                "name": "群聊 2",
                "timestamp_ms": 1_700_000_000_002u64,
                "at_data": {"mentioned_id": "user-2", "msg_seq": 102}
            }
        ],
        "total": 3
    }));

    let bytes = Encoder::new(&registry)
        .encode("ConversationList", &input)
        .unwrap();
    let decoded = ConversationList::decode(bytes.as_slice()).unwrap();

    let mut expected = prost_conversation_list();
    expected.server_trace.clear();
    assert_eq!(decoded, expected);
}

#[test]
fn test_negative_int32_bytes_match_prost() {
    let registry = chat_registry();
    let status = Status {
        number: Some(9),
        code: -5,
        msg: "denied".to_string(),
    };

    let ours = Encoder::new(&registry)
        .encode(
            "Status",
            &record(json!({"number": 9, "code": -5, "msg": "denied"})),
        )
        .unwrap();
    assert_eq!(ours, status.encode_to_vec());

    let decoded = Decoder::new(&registry)
        .decode("Status", &status.encode_to_vec())
        .unwrap();
    assert_eq!(decoded["code"], CodecValue::Int32(-5));
}

#[test]
fn test_fixed64_double_needs_fallback() {
    // prost writes `double` as fixed64, a wire type this codec does not speak
    let info = UserInfo {
        status: Some(Status {
            number: None,
            code: 1,
            msg: "success".to_string(),
        }),
        data: Some(UserInfoData {
            id: "100001".to_string(),
            name: "韩梅梅".to_string(),
            email: "meimei@example.com".to_string(),
            coin: 9.5,
        }),
    };
    let bytes = info.encode_to_vec();

    let registry = chat_registry();
    let err = Decoder::new(&registry).decode("UserInfo", &bytes).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedWireType { wire_type: 1, .. }));

    let codec = ProtobufCodec::new(std::sync::Arc::new(registry)).unwrap();
    let outcome = codec.decode_with_fallback("UserInfo", &bytes).unwrap();
    assert!(outcome.is_recovered());
    let record = outcome.record();
    assert_int(record, "status.code", 1);
    assert_str(record, "data.email", "meimei@example.com");
    assert_str(record, "data.name", "韩梅梅");
}
