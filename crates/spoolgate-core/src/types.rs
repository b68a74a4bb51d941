// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Spoolgate printing facade.
//
// Field names serialize in camelCase so that printer records, job records and
// backend fixtures share one JSON shape with the native spooler bindings.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u32);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Printer state as presented to callers.
///
/// Known spooler codes are translated to the first three variants; anything
/// else the backend reports is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrinterStatus {
    Idle,
    Printing,
    Stopped,
    Other(String),
}

impl PrinterStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "IDLE",
            Self::Printing => "PRINTING",
            Self::Stopped => "STOPPED",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Whether the status carries no information at all (an empty raw value).
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(raw) if raw.is_empty())
    }
}

impl From<String> for PrinterStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "IDLE" => Self::Idle,
            "PRINTING" => Self::Printing,
            "STOPPED" => Self::Stopped,
            _ => Self::Other(value),
        }
    }
}

impl From<PrinterStatus> for String {
    fn from(value: PrinterStatus) -> Self {
        match value {
            PrinterStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value in a printer's capability bag.
///
/// Integers are tried before floats, so `3` stays a `Number` and only
/// fractional or out-of-range numbers become `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Float(f64),
    Flag(bool),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl OptionValue {
    /// Textual form used for code comparisons (`"3"` and `3` compare equal).
    pub fn to_raw_string(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Flag(b) => b.to_string(),
            Self::Timestamp(ts) => ts.to_rfc3339(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Empty text, zero and `false` carry no value for normalization purposes.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Flag(b) => !b,
            Self::Timestamp(_) => false,
            Self::Text(s) => s.is_empty(),
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<DateTime<Utc>> for OptionValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

/// One OS-registered print destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PrinterStatus>,
    /// Capability bag in the order the backend reported it.
    #[serde(default)]
    pub options: IndexMap<String, OptionValue>,
    /// Jobs currently held by the spooler for this printer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobInfo>,
}

impl Printer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            status: None,
            options: IndexMap::new(),
            jobs: Vec::new(),
        }
    }

    /// Mark this printer as carrying the per-destination default flag.
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn with_status(mut self, status: PrinterStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }
}

/// A unit of work held by the spooler, identified by `(printer_name, id)`.
///
/// Status fields are whatever the backend reports; they are not renormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub id: JobId,
    pub printer_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub priority: u32,
    /// Payload size in bytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_time: Option<DateTime<Utc>>,
}

/// Driver capability dump: option name (`PageSize`, `Resolution`, ...) mapped
/// to each supported value and whether it is currently selected.
pub type DriverOptions = IndexMap<String, IndexMap<String, bool>>;

/// Driver option holding the paper size choices.
pub const PAGE_SIZE_OPTION: &str = "PageSize";

/// Printer option carrying the raw spooler state code.
pub const PRINTER_STATE_OPTION: &str = "printer-state";
