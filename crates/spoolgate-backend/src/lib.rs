// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolgate: Spooler backend abstractions.
//
// Defines the traits a platform binding implements and resolves the configured
// backend into the single shared instance the facade talks to.

pub mod memory;
pub mod stub;
pub mod traits;

use std::sync::Arc;

use tracing::info;

use spoolgate_core::BackendConfig;
use spoolgate_core::error::Result;

pub use memory::{MemoryBackend, MemoryFixture};
pub use stub::StubBackend;
pub use traits::{FileJobSubmit, JobControl, PrintBackend, PrinterDirectory, RawJobSubmit};

/// Resolve the configured backend into the process-wide adapter.
///
/// Fails with `SpoolgateError::Configuration` when the configuration names a
/// backend that cannot be brought up (e.g. an unreadable fixture).
pub fn select_backend(config: &BackendConfig) -> Result<Arc<dyn PrintBackend>> {
    let backend: Arc<dyn PrintBackend> = match config {
        BackendConfig::Stub => Arc::new(StubBackend),
        BackendConfig::Memory { fixture: None } => Arc::new(MemoryBackend::default()),
        BackendConfig::Memory {
            fixture: Some(path),
        } => Arc::new(MemoryBackend::from_fixture_file(path)?),
    };
    info!(backend = backend.backend_name(), "print backend selected");
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoolgate_core::SpoolgateError;

    #[test]
    fn selects_stub_and_memory() {
        let stub = select_backend(&BackendConfig::Stub).expect("stub");
        assert_eq!(stub.backend_name(), "stub");

        let memory = select_backend(&BackendConfig::Memory { fixture: None }).expect("memory");
        assert_eq!(memory.backend_name(), "memory");
        assert!(memory.list_printers().expect("list").is_empty());
    }

    #[test]
    fn missing_fixture_fails_fast() {
        let config = BackendConfig::Memory {
            fixture: Some("/nonexistent/printers.json".into()),
        };
        assert!(matches!(
            select_backend(&config),
            Err(SpoolgateError::Configuration(_))
        ));
    }
}
