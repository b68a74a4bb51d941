// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for spooler backends.
//
// A backend binds one OS print system (CUPS, the Win32 spooler, or the
// in-process memory spooler) behind the primitives the facade consumes.
// Submission primitives are optional: a backend that cannot accept raw data or
// files simply returns `None` from the matching accessor.

use std::path::Path;

use spoolgate_core::error::Result;
use spoolgate_core::{DriverOptions, JobId, JobInfo, JobOptions, Printer};

/// Unified backend that groups every spooler capability.
///
/// Instances are created once at startup and shared across threads, so the
/// trait requires `Send + Sync`.
pub trait PrintBackend: PrinterDirectory + JobControl + Send + Sync {
    /// Human-readable backend name (e.g. "cups", "winspool", "memory").
    fn backend_name(&self) -> &str;

    /// Raw-data submission, if the spooler accepts it.
    fn raw_submitter(&self) -> Option<&dyn RawJobSubmit> {
        None
    }

    /// File submission, if the spooler accepts it.
    fn file_submitter(&self) -> Option<&dyn FileJobSubmit> {
        None
    }
}

/// Printer enumeration and capability queries.
///
/// Records are returned exactly as the spooler reports them; normalization
/// happens in the facade.
pub trait PrinterDirectory {
    /// Every registered destination, each with its active jobs.
    fn list_printers(&self) -> Result<Vec<Printer>>;

    /// A single destination, or `None` if the name is unknown.
    fn printer_info(&self, name: &str) -> Result<Option<Printer>>;

    /// Raw driver capability dump for a destination.
    fn driver_options(&self, name: &str) -> Result<DriverOptions>;

    /// The system-wide default destination, if the spooler reports one.
    ///
    /// CUPS only reports the server default here, not the lpoptions one.
    fn default_printer_name(&self) -> Result<Option<String>>;
}

/// Submit already-formatted bytes.
pub trait RawJobSubmit {
    /// Returns the spooler job id, or `None` (or id 0) if the spooler
    /// accepted the call but assigned no job.
    ///
    /// With no `printer` the spooler prints to its own default destination.
    fn submit_raw_job(
        &self,
        data: &[u8],
        printer: Option<&str>,
        docname: &str,
        data_type: &str,
        options: &JobOptions,
    ) -> Result<Option<JobId>>;
}

/// Submit a file the spooler reads itself.
pub trait FileJobSubmit {
    /// Returns the spooler's textual reply: a numeric job id on success,
    /// otherwise the spooler's error message.
    fn submit_file_job(
        &self,
        path: &Path,
        docname: &str,
        printer: &str,
        options: &JobOptions,
    ) -> Result<String>;
}

/// Job inspection and control.
pub trait JobControl {
    /// A job record, or `None` if the spooler no longer knows the job.
    fn job(&self, printer: &str, job_id: JobId) -> Result<Option<JobInfo>>;

    /// Apply one of [`supported_job_commands`](Self::supported_job_commands)
    /// to a job.  Returns whether the spooler accepted the command.
    fn set_job(&self, printer: &str, job_id: JobId, command: &str) -> Result<bool>;

    /// Data types accepted by raw submission (`RAW`, `TEXT`, ...).
    fn supported_data_formats(&self) -> Result<Vec<String>>;

    /// Commands accepted by `set_job` (`CANCEL`, `PAUSE`, ...).
    fn supported_job_commands(&self) -> Result<Vec<String>>;
}
