// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Predefined chat-platform message types.
//!
//! These mirror the remote service's wire contract for the endpoints the
//! client talks to:
//!
//! - `Status` - Envelope status carried as field 1 of every response
//! - `ConversationList` / `ConversationData` / `AtData` - Conversation list
//! - `UserInfo` / `UserInfoData` - Current user profile
//! - `SendMessage` / `SendMessageData` - Outbound message
//! - `ListMessageSend` / `ListMessage` / `MessageData` and its parts - History
//!
//! Responses share the envelope shape:
//! ```text
//! Status status = 1;
//! <payload> data = 2;
//! ```

use crate::core::{Result, SchemaRegistry, SchemaRegistryBuilder};
use crate::schema::ast::FieldKind;
use crate::schema::ast::ScalarType::{Double, Int32, String as Str, UInt64};
use crate::schema::descriptor::MessageDescriptor;

fn status() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("Status")
        .optional("number", 1, UInt64)
        .required("code", 2, Int32)
        .required("msg", 3, Str)
        .build()
}

fn at_data() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("AtData")
        .optional("unknown", 1, UInt64)
        .optional("mentioned_id", 2, Str)
        .optional("mentioned_name", 3, Str)
        .optional("mentioned_in", 4, Str)
        .optional("mentioner_id", 6, Str)
        .optional("mentioner_name", 7, Str)
        .optional("msg_seq", 8, UInt64)
        .build()
}

fn conversation_data() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("ConversationData")
        .required("chat_id", 1, Str)
        .required("chat_type", 2, UInt64)
        .required("name", 3, Str)
        .optional("chat_content", 4, Str)
        .optional("timestamp_ms", 5, UInt64)
        .optional("unread_message", 6, UInt64)
        .optional("at", 7, UInt64)
        .optional("avatar_id", 8, UInt64)
        .optional("avatar_url", 9, Str)
        .optional("do_not_disturb", 11, UInt64)
        .optional("timestamp", 12, UInt64)
        .optional("at_data", 14, FieldKind::message("AtData"))
        .optional("certification_level", 16, UInt64)
        .build()
}

fn conversation_list() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("ConversationList")
        .required("status", 1, FieldKind::message("Status"))
        .repeated("data", 2, FieldKind::message("ConversationData"))
        .optional("total", 3, UInt64)
        .optional("request_id", 4, Str)
        .build()
}

fn user_info_data() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("UserInfoData")
        .required("id", 1, Str)
        .required("name", 2, Str)
        .optional("avatar_url", 4, Str)
        .optional("avatar_id", 5, UInt64)
        .optional("phone", 6, Str)
        .optional("email", 7, Str)
        .optional("coin", 8, Double)
        .optional("is_vip", 9, Int32)
        .optional("vip_expired_time", 10, UInt64)
        .optional("invitation_code", 12, Str)
        .build()
}

fn user_info() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("UserInfo")
        .required("status", 1, FieldKind::message("Status"))
        .optional("data", 2, FieldKind::message("UserInfoData"))
        .build()
}

fn send_message_data() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("SendMessageData")
        .optional("text", 1, Str)
        .optional("buttons", 2, Str)
        .optional("file_name", 4, Str)
        .optional("file_key", 5, Str)
        .repeated("mentioned_id", 6, Str)
        .optional("form", 7, Str)
        .optional("quote_msg_text", 8, Str)
        .optional("image", 9, Str)
        .build()
}

fn send_message() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("SendMessage")
        .required("msg_id", 2, Str)
        .required("chat_id", 3, Str)
        .required("chat_type", 4, UInt64)
        .optional("data", 5, FieldKind::message("SendMessageData"))
        .required("content_type", 6, UInt64)
        .optional("quote_msg_id", 8, Str)
        .build()
}

fn message_tag() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("MessageTag")
        .optional("id", 1, UInt64)
        .optional("text", 3, Str)
        .optional("color", 4, Str)
        .build()
}

fn message_sender() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("MessageSender")
        .optional("chat_id", 1, Str)
        .optional("chat_type", 2, UInt64)
        .optional("name", 3, Str)
        .optional("avatar_url", 4, Str)
        .repeated("tag_old", 6, Str)
        .repeated("tag", 7, FieldKind::message("MessageTag"))
        .build()
}

fn message_content() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("MessageContent")
        .optional("text", 1, Str)
        .optional("buttons", 2, Str)
        .optional("image_url", 3, Str)
        .optional("file_name", 4, Str)
        .optional("file_url", 5, Str)
        .optional("form", 7, Str)
        .optional("quote_msg_text", 8, Str)
        .optional("sticker_url", 9, Str)
        .optional("post_id", 10, Str)
        .optional("post_title", 11, Str)
        .optional("post_content", 12, Str)
        .optional("post_content_type", 13, Str)
        .optional("expression_id", 15, Str)
        .optional("quote_image_url", 16, Str)
        .optional("quote_image_name", 17, Str)
        .optional("file_size", 18, UInt64)
        .optional("video_url", 19, Str)
        .optional("audio_url", 21, Str)
        .optional("audio_time", 22, UInt64)
        .optional("quote_video_url", 23, Str)
        .optional("quote_video_time", 24, UInt64)
        .optional("sticker_item_id", 25, UInt64)
        .optional("sticker_pack_id", 26, UInt64)
        .optional("call_text", 29, Str)
        .optional("call_status_text", 32, Str)
        .optional("width", 33, UInt64)
        .optional("height", 34, UInt64)
        .optional("tip", 37, Str)
        .build()
}

fn message_cmd() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("MessageCmd")
        .optional("name", 2, Str)
        .optional("type", 4, UInt64)
        .build()
}

fn message_data() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("MessageData")
        .optional("msg_id", 1, Str)
        .optional("sender", 2, FieldKind::message("MessageSender"))
        .optional("direction", 3, Str)
        .optional("content_type", 4, UInt64)
        .optional("content", 5, FieldKind::message("MessageContent"))
        .optional("send_time", 6, UInt64)
        .optional("cmd", 7, FieldKind::message("MessageCmd"))
        .optional("msg_delete_time", 8, UInt64)
        .optional("quote_msg_id", 9, Str)
        .optional("msg_seq", 10, UInt64)
        .optional("edit_time", 12, UInt64)
        .build()
}

fn list_message() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("ListMessage")
        .optional("status", 1, FieldKind::message("Status"))
        .repeated("msg", 2, FieldKind::message("MessageData"))
        .build()
}

fn list_message_send() -> Result<MessageDescriptor> {
    MessageDescriptor::builder("ListMessageSend")
        .optional("msg_count", 2, UInt64)
        .optional("msg_id", 3, Str)
        .optional("chat_type", 4, UInt64)
        .optional("chat_id", 5, Str)
        .build()
}

/// All predefined chat-platform descriptors.
pub fn chat_platform_types() -> Result<Vec<MessageDescriptor>> {
    Ok(vec![
        status()?,
        at_data()?,
        conversation_data()?,
        conversation_list()?,
        user_info_data()?,
        user_info()?,
        send_message_data()?,
        send_message()?,
        message_tag()?,
        message_sender()?,
        message_content()?,
        message_cmd()?,
        message_data()?,
        list_message()?,
        list_message_send()?,
    ])
}

/// Register the predefined descriptors into a builder.
pub fn register_chat_platform_types(builder: &mut SchemaRegistryBuilder) -> Result<()> {
    builder.register_all(chat_platform_types()?)?;
    Ok(())
}

/// Build a frozen registry holding only the predefined descriptors.
pub fn chat_platform_registry() -> Result<SchemaRegistry> {
    let mut builder = SchemaRegistry::builder();
    register_chat_platform_types(&mut builder)?;
    Ok(builder.freeze())
}
