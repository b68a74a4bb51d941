// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolgate: Core types, requests, configuration, and error definitions
// shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod request;
pub mod types;

pub use config::{BackendConfig, SpoolgateConfig};
pub use error::{ErrorKind, SpoolgateError};
pub use request::{FileJobRequest, JobOptions, RawJobRequest};
pub use types::*;
