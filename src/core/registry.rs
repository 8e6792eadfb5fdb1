// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema registry: type name -> message descriptor.
//!
//! Population and use are split into two types. A [`SchemaRegistryBuilder`]
//! accepts registrations during startup; [`SchemaRegistryBuilder::freeze`]
//! turns it into an immutable [`SchemaRegistry`] that any number of threads
//! can read without locking. Message references are stored by name and
//! resolved at lookup time, so registration order does not matter.
//!
//! A process-wide slot ([`initialize`], [`is_ready`], [`global`]) holds one
//! frozen registry for callers that prefer not to thread an `Arc` around.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use super::error::{CodecError, Result};
use crate::schema::MessageDescriptor;

/// Mutable registry used during the initialization phase.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    types: HashMap<String, Arc<MessageDescriptor>>,
}

impl SchemaRegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message descriptor.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::DuplicateType` if the name is already registered.
    pub fn register(&mut self, descriptor: MessageDescriptor) -> Result<&mut Self> {
        let name = descriptor.name().to_string();
        if self.types.contains_key(&name) {
            return Err(CodecError::duplicate_type(name));
        }
        self.types.insert(name, Arc::new(descriptor));
        Ok(self)
    }

    /// Register several descriptors, stopping at the first failure.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = MessageDescriptor>,
    ) -> Result<&mut Self> {
        for descriptor in descriptors {
            self.register(descriptor)?;
        }
        Ok(self)
    }

    /// Check if a type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Freeze into a read-only registry.
    ///
    /// Dangling message references are logged, not rejected: they surface
    /// as `UnknownType` when a record actually reaches them.
    pub fn freeze(self) -> SchemaRegistry {
        let registry = SchemaRegistry { types: self.types };
        for (owner, missing) in registry.unresolved_references() {
            warn!(
                context = "schema_registry",
                owner = %owner,
                missing = %missing,
                "Message type references an unregistered type"
            );
        }
        info!(
            context = "schema_registry",
            types = registry.len(),
            "Schema registry frozen"
        );
        registry
    }
}

/// Immutable, thread-safe table of message descriptors.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<String, Arc<MessageDescriptor>>,
}

impl SchemaRegistry {
    /// Start a new registry builder.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// Look up a descriptor by type name.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnknownType` when the name is not registered.
    pub fn resolve(&self, type_name: &str) -> Result<&MessageDescriptor> {
        self.types
            .get(type_name)
            .map(|d| d.as_ref())
            .ok_or_else(|| CodecError::unknown_type(type_name))
    }

    /// Check if a type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// `(owner, missing)` pairs for message references with no registered target.
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut missing: Vec<(String, String)> = self
            .types
            .values()
            .flat_map(|desc| {
                desc.referenced_types()
                    .filter(|name| !self.types.contains_key(*name))
                    .map(|name| (desc.name().to_string(), name.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        missing.sort();
        missing
    }
}

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

/// Install the process-wide registry. Call once, before any traffic.
///
/// # Errors
///
/// Returns `CodecError::RegistryAlreadyInitialized` on a second call.
pub fn initialize(registry: SchemaRegistry) -> Result<&'static SchemaRegistry> {
    let types = registry.len();
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| CodecError::RegistryAlreadyInitialized)?;
    info!(
        context = "schema_registry",
        types, "Global schema registry initialized"
    );
    global()
}

/// Check whether the process-wide registry has been installed.
pub fn is_ready() -> bool {
    GLOBAL_REGISTRY.get().is_some()
}

/// Get the process-wide registry.
///
/// # Errors
///
/// Returns `CodecError::RegistryNotReady` before [`initialize`] has run.
pub fn global() -> Result<&'static SchemaRegistry> {
    GLOBAL_REGISTRY.get().ok_or(CodecError::RegistryNotReady)
}
