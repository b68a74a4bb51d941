// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Spoolgate.

use thiserror::Error;

/// Top-level error type for all Spoolgate operations.
#[derive(Debug, Error)]
pub enum SpoolgateError {
    // -- Configuration --
    #[error("no usable print backend: {0}")]
    Configuration(String),

    // -- Backend capability --
    #[error("not supported: {0}")]
    Unsupported(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Validation --
    #[error("must provide at least a filename")]
    MissingFilename,

    #[error("printer parameter or default printer is not defined")]
    NoPrinterSelected,

    #[error("invalid print request: {0}")]
    InvalidRequest(String),

    // -- Backend --
    #[error("print backend error: {0}")]
    Backend(String),

    #[error("printer not found: {0}")]
    PrinterNotFound(String),

    #[error("job {job_id} not found on printer {printer}")]
    JobNotFound { printer: String, job_id: u32 },

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`SpoolgateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable backend, or the configuration could not be read.
    Configuration,
    /// The backend lacks the requested primitive.
    Unsupported,
    /// A request was rejected before reaching the backend.
    Validation,
    /// The backend raised an error or returned a failure indicator.
    Backend,
    /// A specific printer or job does not exist.
    NotFound,
}

impl SpoolgateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::Io(_) | Self::Serialization(_) => {
                ErrorKind::Configuration
            }
            Self::Unsupported(_) | Self::PlatformUnavailable => ErrorKind::Unsupported,
            Self::MissingFilename | Self::NoPrinterSelected | Self::InvalidRequest(_) => {
                ErrorKind::Validation
            }
            Self::Backend(_) => ErrorKind::Backend,
            Self::PrinterNotFound(_) | Self::JobNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SpoolgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_classified() {
        assert_eq!(SpoolgateError::MissingFilename.kind(), ErrorKind::Validation);
        assert_eq!(SpoolgateError::NoPrinterSelected.kind(), ErrorKind::Validation);
    }

    #[test]
    fn not_found_carries_identity() {
        let err = SpoolgateError::JobNotFound {
            printer: "Office".into(),
            job_id: 7,
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "job 7 not found on printer Office");
    }

    #[test]
    fn io_errors_count_as_configuration() {
        let err: SpoolgateError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
