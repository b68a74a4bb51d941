// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub backend for builds where no spooler binding is configured.
//
// Every query returns `PlatformUnavailable` and no submission primitive is
// offered, so the facade reports submissions as unsupported.

use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{DriverOptions, JobId, JobInfo, Printer};

use crate::traits::*;

/// No-op backend.
pub struct StubBackend;

impl PrintBackend for StubBackend {
    fn backend_name(&self) -> &str {
        "stub"
    }
}

impl PrinterDirectory for StubBackend {
    fn list_printers(&self) -> Result<Vec<Printer>> {
        tracing::warn!("PrinterDirectory::list_printers called on stub backend");
        Err(SpoolgateError::PlatformUnavailable)
    }

    fn printer_info(&self, _name: &str) -> Result<Option<Printer>> {
        tracing::warn!("PrinterDirectory::printer_info called on stub backend");
        Err(SpoolgateError::PlatformUnavailable)
    }

    fn driver_options(&self, _name: &str) -> Result<DriverOptions> {
        Err(SpoolgateError::PlatformUnavailable)
    }

    fn default_printer_name(&self) -> Result<Option<String>> {
        tracing::warn!("PrinterDirectory::default_printer_name called on stub backend");
        Err(SpoolgateError::PlatformUnavailable)
    }
}

impl JobControl for StubBackend {
    fn job(&self, _printer: &str, _job_id: JobId) -> Result<Option<JobInfo>> {
        Err(SpoolgateError::PlatformUnavailable)
    }

    fn set_job(&self, _printer: &str, _job_id: JobId, _command: &str) -> Result<bool> {
        Err(SpoolgateError::PlatformUnavailable)
    }

    fn supported_data_formats(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn supported_job_commands(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
