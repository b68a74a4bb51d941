// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print orchestrator.
//
// Turns a typed submission request into exactly one backend call: defaults
// are filled in, the target printer is resolved, and the request is rejected
// before dispatch when it cannot succeed.  A file job needs a resolved printer;
// a raw job without one is left to the spooler's own default.  Every
// submission ends in exactly one outcome; there is no retry at this layer.

use spoolgate_backend::PrintBackend;
use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{FileJobRequest, JobId, RawJobRequest, SpoolgateConfig};
use tracing::{info, instrument, warn};

use crate::resolver::resolve_printer;

/// Error message when the spooler accepts a job without assigning an id.
pub const NO_JOB_ID: &str = "backend returned no job id";

/// Validates and dispatches submissions against one backend.
pub struct PrintOrchestrator<'a> {
    backend: &'a dyn PrintBackend,
    config: &'a SpoolgateConfig,
}

impl<'a> PrintOrchestrator<'a> {
    pub fn new(backend: &'a dyn PrintBackend, config: &'a SpoolgateConfig) -> Self {
        Self { backend, config }
    }

    /// Submit already-formatted bytes.
    #[instrument(skip(self, request), fields(bytes = request.data.len(), printer = ?request.printer))]
    pub fn submit_raw(&self, request: RawJobRequest) -> Result<JobId> {
        let outcome = self.dispatch_raw(request);
        log_outcome("raw", &outcome);
        outcome
    }

    /// Submit a file the spooler reads itself.
    #[instrument(skip(self, request), fields(file = %request.filename.display(), printer = ?request.printer))]
    pub fn submit_file(&self, request: FileJobRequest) -> Result<JobId> {
        let outcome = self.dispatch_file(request);
        log_outcome("file", &outcome);
        outcome
    }

    fn dispatch_raw(&self, request: RawJobRequest) -> Result<JobId> {
        let RawJobRequest {
            data,
            printer,
            docname,
            data_type,
            options,
        } = request;

        let submitter = self.backend.raw_submitter().ok_or_else(|| {
            SpoolgateError::Unsupported(format!(
                "raw job submission ({} backend)",
                self.backend.backend_name()
            ))
        })?;

        let data_type = non_empty(data_type)
            .unwrap_or_else(|| self.config.default_data_type.clone())
            .to_uppercase();
        let docname =
            non_empty(docname).unwrap_or_else(|| self.config.default_document_name.clone());
        // With nothing resolved the spooler picks its own default destination.
        let printer = resolve_printer(self.backend, printer.as_deref())?;

        match submitter.submit_raw_job(&data, printer.as_deref(), &docname, &data_type, &options)? {
            Some(id) if id.0 != 0 => Ok(id),
            _ => Err(SpoolgateError::Backend(NO_JOB_ID.to_string())),
        }
    }

    fn dispatch_file(&self, request: FileJobRequest) -> Result<JobId> {
        let FileJobRequest {
            filename,
            printer,
            docname,
            options,
        } = request;

        if filename.as_os_str().is_empty() {
            return Err(SpoolgateError::MissingFilename);
        }
        let printer =
            resolve_printer(self.backend, printer.as_deref())?.ok_or(SpoolgateError::NoPrinterSelected)?;
        let docname = non_empty(docname).unwrap_or_else(|| filename.display().to_string());

        let submitter = self.backend.file_submitter().ok_or_else(|| {
            SpoolgateError::Unsupported(format!(
                "file job submission ({} backend)",
                self.backend.backend_name()
            ))
        })?;

        let reply = submitter.submit_file_job(&filename, &docname, &printer, &options)?;
        if reply.trim().is_empty() {
            return Err(SpoolgateError::Backend(NO_JOB_ID.to_string()));
        }
        parse_job_id(&reply).ok_or(SpoolgateError::Backend(reply))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn log_outcome(kind: &str, outcome: &Result<JobId>) {
    match outcome {
        Ok(job_id) => info!(kind, %job_id, "print job submitted"),
        Err(e) => warn!(kind, error = %e, "print job submission failed"),
    }
}

/// Read a job id from a spooler reply.
///
/// Leading whitespace and a `+` sign are accepted and anything after the
/// leading digits is ignored, so `"17 (queued)"` yields 17.  Replies without
/// leading digits are not ids.  Unlike a plain integer-prefix parse, a
/// negative number or a value beyond `u32` is also rejected: job ids are
/// unsigned 32-bit, so such replies are treated as spooler error text.
pub fn parse_job_id(reply: &str) -> Option<JobId> {
    let rest = reply.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok().map(JobId)
}

/// The single outcome of a submission, deliverable to a callback pair.
#[derive(Debug)]
pub struct SubmissionOutcome(Result<JobId>);

impl SubmissionOutcome {
    /// Run exactly one of the two callbacks.
    pub fn dispatch<S, E>(self, on_success: S, on_error: E)
    where
        S: FnOnce(JobId),
        E: FnOnce(SpoolgateError),
    {
        match self.0 {
            Ok(job_id) => on_success(job_id),
            Err(e) => on_error(e),
        }
    }

    pub fn into_result(self) -> Result<JobId> {
        self.0
    }
}

impl From<Result<JobId>> for SubmissionOutcome {
    fn from(result: Result<JobId>) -> Self {
        Self(result)
    }
}
