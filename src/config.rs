// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Codec configuration.
//!
//! Loaded from TOML; every key is optional and falls back to the defaults
//! below.
//!
//! ```toml
//! [decoder]
//! max_depth = 64
//!
//! [fallback]
//! enabled = true
//! default_code = 1
//! default_msg = "success"
//!
//! [[fallback.extractors]]
//! key = "email"
//! pattern = '[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}'
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, Result};

/// Default bound on nested-message recursion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Top-level codec configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Structural encoder/decoder settings
    pub decoder: DecoderConfig,
    /// Heuristic fallback settings
    pub fallback: FallbackConfig,
}

impl CodecConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: CodecConfig =
            toml::from_str(s).map_err(|e| CodecError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CodecError::config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CodecError::config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        if self.decoder.max_depth == 0 {
            return Err(CodecError::config("decoder.max_depth must be at least 1"));
        }
        if let Some(extractor) = self.fallback.extractors.iter().find(|e| e.key.is_empty()) {
            return Err(CodecError::config(format!(
                "fallback extractor with pattern '{}' has an empty key",
                extractor.pattern
            )));
        }
        Ok(())
    }
}

/// Structural encoder/decoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Maximum nested-message depth for encode and decode
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Heuristic fallback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Whether the codec facade may recover through the fallback decoder
    pub enabled: bool,
    /// Status code used when no status could be recovered
    pub default_code: i32,
    /// Status message used when no status could be recovered
    pub default_msg: String,
    /// Pattern extractors applied to recovered text, in order
    pub extractors: Vec<ExtractorConfig>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_code: 1,
            default_msg: "success".to_string(),
            extractors: ExtractorConfig::defaults(),
        }
    }
}

/// One pattern extractor: the first text leaf matching `pattern` fills `key`.
///
/// When the pattern has a capture group, group 1 is the extracted value;
/// otherwise the whole match is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Record key to fill
    pub key: String,
    /// Regular expression (regex crate syntax)
    pub pattern: String,
}

impl ExtractorConfig {
    /// Create an extractor.
    pub fn new(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pattern: pattern.into(),
        }
    }

    /// Built-in extractors for user-profile payloads.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("id", r"^\d{6,}$"),
            Self::new("name", r"\p{Han}+"),
            Self::new("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
            Self::new("phone", r"(?:^|\D)(1[3-9]\d{9})(?:\D|$)"),
            Self::new(
                "avatar_url",
                r#"https?://[^\s"]+\.(?:png|jpe?g|gif|webp)"#,
            ),
        ]
    }
}
