// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async wrapper around `PrinterFacade`.
//
// Spooler calls block, so each call runs on Tokio's blocking pool and the
// returned future resolves exactly once with the facade's result.

use std::sync::Arc;

use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{DriverOptions, FileJobRequest, JobId, JobInfo, Printer, RawJobRequest};

use crate::facade::PrinterFacade;

#[derive(Clone)]
pub struct AsyncPrinterFacade {
    inner: Arc<PrinterFacade>,
}

impl AsyncPrinterFacade {
    pub fn new(facade: PrinterFacade) -> Self {
        Self {
            inner: Arc::new(facade),
        }
    }

    async fn run<T, F>(&self, call: F) -> Result<T>
    where
        F: FnOnce(&PrinterFacade) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let facade = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || call(&facade))
            .await
            .map_err(|e| SpoolgateError::Backend(format!("spooler task failed: {e}")))?
    }

    pub async fn list_printers(&self) -> Result<Vec<Printer>> {
        self.run(|f| f.list_printers()).await
    }

    pub async fn printer(&self, name: Option<String>) -> Result<Option<Printer>> {
        self.run(move |f| f.printer(name.as_deref())).await
    }

    pub async fn default_printer_name(&self) -> Result<Option<String>> {
        self.run(|f| f.default_printer_name()).await
    }

    pub async fn selected_paper_size(&self, printer: Option<String>) -> Result<String> {
        self.run(move |f| f.selected_paper_size(printer.as_deref()))
            .await
    }

    pub async fn printer_driver_options(&self, printer: Option<String>) -> Result<DriverOptions> {
        self.run(move |f| f.printer_driver_options(printer.as_deref()))
            .await
    }

    pub async fn print_direct(&self, request: RawJobRequest) -> Result<JobId> {
        self.run(move |f| f.print_direct(request)).await
    }

    pub async fn print_file(&self, request: FileJobRequest) -> Result<JobId> {
        self.run(move |f| f.print_file(request)).await
    }

    pub async fn job(&self, printer: String, job_id: JobId) -> Result<Option<JobInfo>> {
        self.run(move |f| f.job(&printer, job_id)).await
    }

    pub async fn set_job(&self, printer: String, job_id: JobId, command: String) -> Result<bool> {
        self.run(move |f| f.set_job(&printer, job_id, &command))
            .await
    }

    pub async fn supported_print_formats(&self) -> Result<Vec<String>> {
        self.run(|f| f.supported_print_formats()).await
    }

    pub async fn supported_job_commands(&self) -> Result<Vec<String>> {
        self.run(|f| f.supported_job_commands()).await
    }
}
