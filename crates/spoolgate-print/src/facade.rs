// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer facade: the public entry point.
//
// Wraps the process-wide backend and the resolved configuration.  Queries
// return normalized records; submissions go through the orchestrator.  The
// facade holds no mutable state, so clones are cheap and can be shared across
// threads.

use std::sync::Arc;

use tracing::instrument;

use spoolgate_backend::{JobControl, PrintBackend, PrinterDirectory, select_backend};
use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{
    DriverOptions, FileJobRequest, JobId, JobInfo, Printer, RawJobRequest, SpoolgateConfig,
};

use crate::driver_options::{fetch_driver_options, fetch_selected_paper_size};
use crate::normalize::{normalize_printer, normalize_printers};
use crate::orchestrator::{PrintOrchestrator, SubmissionOutcome};
use crate::resolver::{resolve_default_printer, resolve_printer};

/// Synchronous printing facade over one spooler backend.
#[derive(Clone)]
pub struct PrinterFacade {
    backend: Arc<dyn PrintBackend>,
    config: SpoolgateConfig,
}

impl PrinterFacade {
    pub fn new(backend: Arc<dyn PrintBackend>, config: SpoolgateConfig) -> Self {
        Self { backend, config }
    }

    /// Bring up the backend named by `config`.
    pub fn from_config(config: SpoolgateConfig) -> Result<Self> {
        let backend = select_backend(&config.backend)?;
        Ok(Self::new(backend, config))
    }

    pub fn backend(&self) -> &dyn PrintBackend {
        self.backend.as_ref()
    }

    pub fn config(&self) -> &SpoolgateConfig {
        &self.config
    }

    fn orchestrator(&self) -> PrintOrchestrator<'_> {
        PrintOrchestrator::new(self.backend.as_ref(), &self.config)
    }

    // -- Queries -------------------------------------------------------------

    /// Every destination, normalized.
    #[instrument(skip(self))]
    pub fn list_printers(&self) -> Result<Vec<Printer>> {
        let mut printers = self.backend.list_printers()?;
        normalize_printers(&mut printers);
        Ok(printers)
    }

    /// One destination, normalized; the default printer when `name` is absent.
    /// `None` when the spooler does not know the printer.
    #[instrument(skip(self))]
    pub fn printer(&self, name: Option<&str>) -> Result<Option<Printer>> {
        let name = resolve_printer(self.backend.as_ref(), name)?
            .ok_or(SpoolgateError::NoPrinterSelected)?;
        let mut printer = self.backend.printer_info(&name)?;
        if let Some(printer) = printer.as_mut() {
            normalize_printer(printer);
        }
        Ok(printer)
    }

    #[instrument(skip(self))]
    pub fn default_printer_name(&self) -> Result<Option<String>> {
        resolve_default_printer(self.backend.as_ref())
    }

    /// The page size currently selected in the printer driver, or `""`.
    #[instrument(skip(self))]
    pub fn selected_paper_size(&self, printer: Option<&str>) -> Result<String> {
        fetch_selected_paper_size(self.backend.as_ref(), printer)
    }

    #[instrument(skip(self))]
    pub fn printer_driver_options(&self, printer: Option<&str>) -> Result<DriverOptions> {
        fetch_driver_options(self.backend.as_ref(), printer)
    }

    // -- Submission ----------------------------------------------------------

    /// Send already-formatted bytes to a printer.
    pub fn print_direct(&self, request: RawJobRequest) -> Result<JobId> {
        self.orchestrator().submit_raw(request)
    }

    /// Callback form of [`print_direct`](Self::print_direct): exactly one of
    /// the two closures runs.
    pub fn print_direct_with<S, E>(&self, request: RawJobRequest, on_success: S, on_error: E)
    where
        S: FnOnce(JobId),
        E: FnOnce(SpoolgateError),
    {
        SubmissionOutcome::from(self.print_direct(request)).dispatch(on_success, on_error);
    }

    /// Have the spooler print a file from disk.
    pub fn print_file(&self, request: FileJobRequest) -> Result<JobId> {
        self.orchestrator().submit_file(request)
    }

    /// Callback form of [`print_file`](Self::print_file): exactly one of the
    /// two closures runs.
    pub fn print_file_with<S, E>(&self, request: FileJobRequest, on_success: S, on_error: E)
    where
        S: FnOnce(JobId),
        E: FnOnce(SpoolgateError),
    {
        SubmissionOutcome::from(self.print_file(request)).dispatch(on_success, on_error);
    }

    /// Success-only callback form of [`print_file`](Self::print_file).  With no
    /// error callback the failure is handed back to the caller.
    pub fn print_file_notify<S>(&self, request: FileJobRequest, on_success: S) -> Result<()>
    where
        S: FnOnce(JobId),
    {
        self.print_file(request).map(on_success)
    }

    // -- Jobs ----------------------------------------------------------------

    #[instrument(skip(self))]
    pub fn job(&self, printer: &str, job_id: JobId) -> Result<Option<JobInfo>> {
        self.backend.job(printer, job_id)
    }

    /// Apply a job command (`CANCEL`, `PAUSE`, ...).  Returns whether the
    /// spooler accepted it.
    #[instrument(skip(self))]
    pub fn set_job(&self, printer: &str, job_id: JobId, command: &str) -> Result<bool> {
        self.backend.set_job(printer, job_id, command)
    }

    pub fn supported_print_formats(&self) -> Result<Vec<String>> {
        self.backend.supported_data_formats()
    }

    pub fn supported_job_commands(&self) -> Result<Vec<String>> {
        self.backend.supported_job_commands()
    }
}
