// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print submission requests.
//
// One record per submission kind.  Optional fields are filled from
// `SpoolgateConfig` and the default-printer resolver at submission time;
// unknown fields are rejected when a request is read from JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Spooler-specific job options (CUPS `-o` style key/value pairs).
pub type JobOptions = BTreeMap<String, String>;

/// Submission of already-formatted bytes (ESC/POS, PCL, PostScript, text...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawJobRequest {
    /// Payload handed to the spooler unchanged.
    pub data: Vec<u8>,
    /// Target printer; the default printer when absent.
    #[serde(default)]
    pub printer: Option<String>,
    /// Name shown in the spooler's job list.
    #[serde(default)]
    pub docname: Option<String>,
    /// Spooler data type (`RAW`, `TEXT`, ...); case-insensitive.
    #[serde(default, rename = "type")]
    pub data_type: Option<String>,
    #[serde(default)]
    pub options: JobOptions,
}

impl RawJobRequest {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            printer: None,
            docname: None,
            data_type: None,
            options: JobOptions::new(),
        }
    }

    pub fn printer(mut self, printer: impl Into<String>) -> Self {
        self.printer = Some(printer.into());
        self
    }

    pub fn docname(mut self, docname: impl Into<String>) -> Self {
        self.docname = Some(docname.into());
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Submission of a file already on disk; the spooler reads it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileJobRequest {
    pub filename: PathBuf,
    #[serde(default)]
    pub printer: Option<String>,
    /// Defaults to the filename.
    #[serde(default)]
    pub docname: Option<String>,
    #[serde(default)]
    pub options: JobOptions,
}

impl FileJobRequest {
    pub fn new(filename: impl AsRef<Path>) -> Self {
        Self {
            filename: filename.as_ref().to_path_buf(),
            printer: None,
            docname: None,
            options: JobOptions::new(),
        }
    }

    pub fn printer(mut self, printer: impl Into<String>) -> Self {
        self.printer = Some(printer.into());
        self
    }

    pub fn docname(mut self, docname: impl Into<String>) -> Self {
        self.docname = Some(docname.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}
