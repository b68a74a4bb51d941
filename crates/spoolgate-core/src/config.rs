// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Facade configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpoolgateError};

/// Document name used when a raw submission does not name itself.
pub const DEFAULT_DOCUMENT_NAME: &str = "print job";

/// Spooler data type used when a raw submission does not name one.
pub const DEFAULT_DATA_TYPE: &str = "RAW";

/// Which spooler backend to bind at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
    /// Placeholder that reports every primitive as unavailable.
    #[default]
    Stub,
    /// In-process spooler, optionally seeded from a JSON fixture.
    Memory {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fixture: Option<PathBuf>,
    },
}

impl FromStr for BackendConfig {
    type Err = SpoolgateError;

    /// Parse a command-line identifier: `stub`, `memory` or `memory:<fixture>`.
    fn from_str(s: &str) -> Result<Self> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        match (kind.trim().to_ascii_lowercase().as_str(), arg) {
            ("stub", None) => Ok(Self::Stub),
            ("memory", None) => Ok(Self::Memory { fixture: None }),
            ("memory", Some(path)) if !path.is_empty() => Ok(Self::Memory {
                fixture: Some(PathBuf::from(path)),
            }),
            _ => Err(SpoolgateError::Configuration(format!(
                "unknown backend identifier '{s}'"
            ))),
        }
    }
}

/// Settings resolved once at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoolgateConfig {
    pub backend: BackendConfig,
    /// Document name for raw submissions without one.
    pub default_document_name: String,
    /// Data type for raw submissions without one (uppercased on use).
    pub default_data_type: String,
}

impl Default for SpoolgateConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            default_document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            default_data_type: DEFAULT_DATA_TYPE.to_string(),
        }
    }
}

impl SpoolgateConfig {
    /// Read a JSON configuration file.  Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpoolgateError::Configuration(format!("read {}: {e}", path.display()))
        })?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    pub fn with_backend(mut self, backend: BackendConfig) -> Self {
        self.backend = backend;
        self
    }
}
