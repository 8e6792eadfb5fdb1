// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema model.
//!
//! This module provides:
//! - Field types ([`Field`], [`FieldKind`], [`ScalarType`], [`Cardinality`])
//! - [`MessageDescriptor`] with tag and name indices
//! - The predefined chat-platform message set in [`builtin_types`]
//!
//! Schemas are built programmatically and registered into a
//! [`SchemaRegistry`](crate::core::SchemaRegistry) at startup.

pub mod ast;
pub mod builtin_types;
pub mod descriptor;

pub use ast::{Cardinality, Field, FieldKind, ScalarType, MAX_TAG};
pub use builtin_types::{chat_platform_registry, chat_platform_types, register_chat_platform_types};
pub use descriptor::{DescriptorBuilder, MessageDescriptor};
