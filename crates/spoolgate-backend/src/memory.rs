// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process spooler.
//
// Holds printers, driver dumps and submitted jobs in memory, seeded from a
// `MemoryFixture` (optionally loaded from JSON).  Replies follow the native
// bindings: raw submission yields a job id, file submission yields the id as
// text or the spooler's error message, and `set_job` understands the usual
// CANCEL / PAUSE / RESUME / RESTART / DELETE commands.
//
// All state lives behind one `Mutex` so a single instance can be shared as
// `Arc<dyn PrintBackend>`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{DriverOptions, JobId, JobInfo, JobOptions, Printer};

use crate::traits::*;

const STATUS_PENDING: &str = "PENDING";
const STATUS_PAUSED: &str = "PAUSED";
const STATUS_CANCELLED: &str = "CANCELLED";
const STATUS_COMPLETED: &str = "COMPLETED";

/// Reply when a raw job names no printer and none is registered.
const NO_DEFAULT_DESTINATION: &str = "no default destination available";

/// Job priority assigned to new submissions (CUPS default).
const DEFAULT_PRIORITY: u32 = 50;

/// Seed data for a [`MemoryBackend`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryFixture {
    /// What the spooler reports as its default destination.
    pub default_printer: Option<String>,
    pub printers: Vec<Printer>,
    /// Driver dumps keyed by printer name.
    pub driver_options: IndexMap<String, DriverOptions>,
    /// Raw data types; the CUPS set when empty.
    pub data_formats: Vec<String>,
    /// Job commands; CANCEL / PAUSE / RESUME / RESTART / DELETE when empty.
    pub job_commands: Vec<String>,
}

impl MemoryFixture {
    /// Read a fixture from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SpoolgateError::Configuration(format!("read fixture {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            SpoolgateError::Configuration(format!("parse fixture {}: {e}", path.display()))
        })
    }
}

fn default_data_formats() -> Vec<String> {
    ["RAW", "TEXT", "PDF", "JPEG", "POSTSCRIPT", "COMMAND", "AUTO"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_job_commands() -> Vec<String> {
    ["CANCEL", "PAUSE", "RESUME", "RESTART", "DELETE"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// How the next submission should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedFailure {
    /// Accept the call but assign no job (raw: `None`, file: empty reply).
    NoJobId,
    /// Raise a backend error with this message.
    Error(String),
    /// File submission replies with this text; raw submission assigns no job.
    Reply(String),
}

/// How often each primitive was invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_printers: usize,
    pub printer_info: usize,
    pub driver_options: usize,
    pub default_printer_name: usize,
    pub submit_raw: usize,
    pub submit_file: usize,
    pub job: usize,
    pub set_job: usize,
}

/// A submission as the spooler received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSubmission {
    pub job_id: JobId,
    pub printer: String,
    pub docname: String,
    /// Data type for raw jobs; `None` for file jobs.
    pub data_type: Option<String>,
    pub options: JobOptions,
    pub payload: Vec<u8>,
}

struct MemoryState {
    fixture: MemoryFixture,
    jobs: Vec<JobInfo>,
    submissions: Vec<RecordedSubmission>,
    next_job_id: u32,
    fail_next: Option<ScriptedFailure>,
    calls: CallCounts,
}

/// In-memory [`PrintBackend`].
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
    raw_supported: bool,
    file_supported: bool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(MemoryFixture::default())
    }
}

impl MemoryBackend {
    pub fn new(mut fixture: MemoryFixture) -> Self {
        if fixture.data_formats.is_empty() {
            fixture.data_formats = default_data_formats();
        }
        if fixture.job_commands.is_empty() {
            fixture.job_commands = default_job_commands();
        }
        Self {
            state: Mutex::new(MemoryState {
                fixture,
                jobs: Vec::new(),
                submissions: Vec::new(),
                next_job_id: 1,
                fail_next: None,
                calls: CallCounts::default(),
            }),
            raw_supported: true,
            file_supported: true,
        }
    }

    /// Build a backend from a JSON fixture file.
    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self> {
        let fixture = MemoryFixture::load(path)?;
        info!(printers = fixture.printers.len(), "memory spooler fixture loaded");
        Ok(Self::new(fixture))
    }

    /// Set the id the next accepted job receives.
    pub fn with_next_job_id(mut self, id: u32) -> Self {
        if let Ok(state) = self.state.get_mut() {
            state.next_job_id = id;
        }
        self
    }

    /// Drop raw-data submission support.
    pub fn without_raw_jobs(mut self) -> Self {
        self.raw_supported = false;
        self
    }

    /// Drop file submission support.
    pub fn without_file_jobs(mut self) -> Self {
        self.file_supported = false;
        self
    }

    /// Make the next submission (raw or file) fail as described.
    pub fn fail_next_submission(&self, failure: ScriptedFailure) -> Result<()> {
        self.state()?.fail_next = Some(failure);
        Ok(())
    }

    /// Replace the reported default destination.
    pub fn set_default_printer(&self, name: Option<&str>) -> Result<()> {
        self.state()?.fixture.default_printer = name.map(str::to_string);
        Ok(())
    }

    pub fn calls(&self) -> Result<CallCounts> {
        Ok(self.state()?.calls.clone())
    }

    pub fn submissions(&self) -> Result<Vec<RecordedSubmission>> {
        Ok(self.state()?.submissions.clone())
    }

    /// Mark a job as finished, as the spooler would after the last page.
    pub fn complete_job(&self, printer: &str, job_id: JobId) -> Result<()> {
        let mut state = self.state()?;
        let job = find_job_mut(&mut state.jobs, printer, job_id)?;
        job.status = vec![STATUS_COMPLETED.to_string()];
        job.completed_time = Some(Utc::now());
        Ok(())
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| SpoolgateError::Backend("memory spooler state poisoned".into()))
    }
}

impl MemoryState {
    fn has_printer(&self, name: &str) -> bool {
        self.fixture.printers.iter().any(|p| p.name == name)
    }

    /// Destination used when a raw job names none: the reported default if
    /// it is registered, otherwise the first registered printer.
    fn spooler_default(&self) -> Option<String> {
        self.fixture
            .default_printer
            .as_deref()
            .filter(|name| self.has_printer(name))
            .or_else(|| self.fixture.printers.first().map(|p| p.name.as_str()))
            .map(str::to_string)
    }

    fn active_jobs(&self, printer: &str) -> Vec<JobInfo> {
        self.jobs
            .iter()
            .filter(|j| j.printer_name == printer && is_active(j))
            .cloned()
            .collect()
    }

    fn enqueue(
        &mut self,
        printer: &str,
        docname: &str,
        data_type: Option<&str>,
        options: &JobOptions,
        payload: Vec<u8>,
    ) -> JobId {
        let job_id = JobId(self.next_job_id);
        self.next_job_id = self.next_job_id.saturating_add(1);

        self.jobs.push(JobInfo {
            id: job_id,
            printer_name: printer.to_string(),
            name: docname.to_string(),
            user: None,
            format: data_type.map(str::to_string),
            priority: DEFAULT_PRIORITY,
            size: payload.len() as u64,
            status: vec![STATUS_PENDING.to_string()],
            creation_time: Some(Utc::now()),
            processing_time: None,
            completed_time: None,
        });
        self.submissions.push(RecordedSubmission {
            job_id,
            printer: printer.to_string(),
            docname: docname.to_string(),
            data_type: data_type.map(str::to_string),
            options: options.clone(),
            payload,
        });
        job_id
    }
}

fn is_active(job: &JobInfo) -> bool {
    !job
        .status
        .iter()
        .any(|s| s == STATUS_CANCELLED || s == STATUS_COMPLETED)
}

fn find_job_mut<'a>(jobs: &'a mut [JobInfo], printer: &str, job_id: JobId) -> Result<&'a mut JobInfo> {
    jobs.iter_mut()
        .find(|j| j.printer_name == printer && j.id == job_id)
        .ok_or_else(|| SpoolgateError::JobNotFound {
            printer: printer.to_string(),
            job_id: job_id.0,
        })
}

impl PrintBackend for MemoryBackend {
    fn backend_name(&self) -> &str {
        "memory"
    }

    fn raw_submitter(&self) -> Option<&dyn RawJobSubmit> {
        self.raw_supported.then_some(self as &dyn RawJobSubmit)
    }

    fn file_submitter(&self) -> Option<&dyn FileJobSubmit> {
        self.file_supported.then_some(self as &dyn FileJobSubmit)
    }
}

impl PrinterDirectory for MemoryBackend {
    fn list_printers(&self) -> Result<Vec<Printer>> {
        let mut state = self.state()?;
        state.calls.list_printers += 1;
        let printers = state
            .fixture
            .printers
            .iter()
            .map(|p| {
                let mut printer = p.clone();
                printer.jobs = state.active_jobs(&p.name);
                printer
            })
            .collect();
        Ok(printers)
    }

    fn printer_info(&self, name: &str) -> Result<Option<Printer>> {
        let mut state = self.state()?;
        state.calls.printer_info += 1;
        let printer = state
            .fixture
            .printers
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .map(|mut p| {
                p.jobs = state.active_jobs(name);
                p
            });
        Ok(printer)
    }

    fn driver_options(&self, name: &str) -> Result<DriverOptions> {
        let mut state = self.state()?;
        state.calls.driver_options += 1;
        if !state.has_printer(name) {
            return Err(SpoolgateError::PrinterNotFound(name.to_string()));
        }
        Ok(state
            .fixture
            .driver_options
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn default_printer_name(&self) -> Result<Option<String>> {
        let mut state = self.state()?;
        state.calls.default_printer_name += 1;
        Ok(state.fixture.default_printer.clone())
    }
}

impl RawJobSubmit for MemoryBackend {
    #[instrument(skip(self, data, options), fields(bytes = data.len()))]
    fn submit_raw_job(
        &self,
        data: &[u8],
        printer: Option<&str>,
        docname: &str,
        data_type: &str,
        options: &JobOptions,
    ) -> Result<Option<JobId>> {
        let mut state = self.state()?;
        state.calls.submit_raw += 1;

        match state.fail_next.take() {
            Some(ScriptedFailure::Error(msg)) => return Err(SpoolgateError::Backend(msg)),
            Some(ScriptedFailure::NoJobId | ScriptedFailure::Reply(_)) => return Ok(None),
            None => {}
        }

        let printer = match printer {
            Some(name) if !state.has_printer(name) => {
                return Err(SpoolgateError::PrinterNotFound(name.to_string()));
            }
            Some(name) => name.to_string(),
            None => state
                .spooler_default()
                .ok_or_else(|| SpoolgateError::Backend(NO_DEFAULT_DESTINATION.into()))?,
        };
        if !state.fixture.data_formats.iter().any(|f| f == data_type) {
            return Err(SpoolgateError::Backend(format!(
                "unsupported data type '{data_type}'"
            )));
        }

        let job_id = state.enqueue(&printer, docname, Some(data_type), options, data.to_vec());
        debug!(%job_id, "raw job spooled");
        Ok(Some(job_id))
    }
}

impl FileJobSubmit for MemoryBackend {
    #[instrument(skip(self, options), fields(path = %path.display()))]
    fn submit_file_job(
        &self,
        path: &Path,
        docname: &str,
        printer: &str,
        options: &JobOptions,
    ) -> Result<String> {
        let mut state = self.state()?;
        state.calls.submit_file += 1;

        match state.fail_next.take() {
            Some(ScriptedFailure::Error(msg)) => return Err(SpoolgateError::Backend(msg)),
            Some(ScriptedFailure::NoJobId) => return Ok(String::new()),
            Some(ScriptedFailure::Reply(reply)) => return Ok(reply),
            None => {}
        }

        if !state.has_printer(printer) {
            return Ok(format!("{printer}: client-error-not-found"));
        }
        let payload = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(format!("{}: {e}", path.display())),
        };

        let job_id = state.enqueue(printer, docname, None, options, payload);
        debug!(%job_id, "file job spooled");
        Ok(job_id.to_string())
    }
}

impl JobControl for MemoryBackend {
    fn job(&self, printer: &str, job_id: JobId) -> Result<Option<JobInfo>> {
        let mut state = self.state()?;
        state.calls.job += 1;
        Ok(state
            .jobs
            .iter()
            .find(|j| j.printer_name == printer && j.id == job_id)
            .cloned())
    }

    fn set_job(&self, printer: &str, job_id: JobId, command: &str) -> Result<bool> {
        let mut state = self.state()?;
        state.calls.set_job += 1;

        let command = command.to_ascii_uppercase();
        if !state.fixture.job_commands.contains(&command) {
            return Err(SpoolgateError::Backend(format!(
                "unsupported job command '{command}'"
            )));
        }

        if command == "DELETE" {
            let before = state.jobs.len();
            state
                .jobs
                .retain(|j| !(j.printer_name == printer && j.id == job_id));
            return Ok(state.jobs.len() < before);
        }

        let job = find_job_mut(&mut state.jobs, printer, job_id)?;
        if !is_active(job) {
            return Ok(false);
        }
        let status = match command.as_str() {
            "CANCEL" => STATUS_CANCELLED,
            "PAUSE" => STATUS_PAUSED,
            "RESUME" | "RESTART" => STATUS_PENDING,
            _ => return Ok(false),
        };
        job.status = vec![status.to_string()];
        if command == "CANCEL" {
            job.completed_time = Some(Utc::now());
        }
        debug!(%job_id, %command, "job command applied");
        Ok(true)
    }

    fn supported_data_formats(&self) -> Result<Vec<String>> {
        Ok(self.state()?.fixture.data_formats.clone())
    }

    fn supported_job_commands(&self) -> Result<Vec<String>> {
        Ok(self.state()?.fixture.job_commands.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn office_fixture() -> MemoryFixture {
        let mut page_sizes = IndexMap::new();
        page_sizes.insert("Letter".to_string(), false);
        page_sizes.insert("A4".to_string(), true);
        let mut driver = DriverOptions::new();
        driver.insert("PageSize".to_string(), page_sizes);

        let mut fixture = MemoryFixture {
            default_printer: Some("Office".into()),
            printers: vec![Printer::new("Office"), Printer::new("Label")],
            ..MemoryFixture::default()
        };
        fixture.driver_options.insert("Office".into(), driver);
        fixture
    }

    #[test]
    fn raw_submission_assigns_sequential_ids() {
        let backend = MemoryBackend::new(office_fixture()).with_next_job_id(42);
        let raw = backend.raw_submitter().expect("raw supported");
        let first = raw
            .submit_raw_job(b"hello", Some("Office"), "doc", "RAW", &JobOptions::new())
            .expect("submit");
        let second = raw
            .submit_raw_job(b"again", Some("Office"), "doc", "TEXT", &JobOptions::new())
            .expect("submit");
        assert_eq!(first, Some(JobId(42)));
        assert_eq!(second, Some(JobId(43)));

        let listed = backend.list_printers().expect("list");
        assert_eq!(listed[0].jobs.len(), 2);
        assert!(listed[1].jobs.is_empty());
    }

    #[test]
    fn raw_submission_rejects_unknown_data_type() {
        let backend = MemoryBackend::new(office_fixture());
        let err = backend
            .submit_raw_job(b"x", Some("Office"), "doc", "BMP", &JobOptions::new())
            .unwrap_err();
        assert!(matches!(err, SpoolgateError::Backend(_)));
    }

    #[test]
    fn file_submission_replies_with_error_text_for_missing_file() {
        let backend = MemoryBackend::new(office_fixture());
        let reply = backend
            .submit_file_job(
                Path::new("/nonexistent/report.pdf"),
                "report",
                "Office",
                &JobOptions::new(),
            )
            .expect("reply");
        assert!(reply.starts_with("/nonexistent/report.pdf: "));
        assert!(backend.submissions().expect("submissions").is_empty());
    }

    #[test]
    fn file_submission_spools_file_contents() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"%PDF-1.7").expect("write");

        let backend = MemoryBackend::new(office_fixture());
        let reply = backend
            .submit_file_job(file.path(), "report", "Office", &JobOptions::new())
            .expect("reply");
        assert_eq!(reply, "1");

        let submissions = backend.submissions().expect("submissions");
        assert_eq!(submissions[0].payload, b"%PDF-1.7");
        assert_eq!(submissions[0].data_type, None);
    }

    #[test]
    fn scripted_failure_applies_once() {
        let backend = MemoryBackend::new(office_fixture());
        backend
            .fail_next_submission(ScriptedFailure::Error("spooler down".into()))
            .expect("script");
        assert!(backend
            .submit_raw_job(b"x", Some("Office"), "doc", "RAW", &JobOptions::new())
            .is_err());
        assert!(backend
            .submit_raw_job(b"x", Some("Office"), "doc", "RAW", &JobOptions::new())
            .is_ok());
    }

    #[test]
    fn cancel_removes_job_from_active_list() {
        let backend = MemoryBackend::new(office_fixture());
        let id = backend
            .submit_raw_job(b"x", Some("Office"), "doc", "RAW", &JobOptions::new())
            .expect("submit")
            .expect("job id");

        assert!(backend.set_job("Office", id, "cancel").expect("cancel"));
        let job = backend.job("Office", id).expect("job").expect("still known");
        assert_eq!(job.status, vec!["CANCELLED".to_string()]);
        assert!(job.completed_time.is_some());

        let office = backend.printer_info("Office").expect("info").expect("exists");
        assert!(office.jobs.is_empty());

        // A finished job does not accept further commands.
        assert!(!backend.set_job("Office", id, "RESUME").expect("resume"));
    }

    #[test]
    fn raw_job_without_printer_goes_to_spooler_default() {
        let backend = MemoryBackend::new(office_fixture());
        let raw = backend.raw_submitter().expect("raw supported");
        raw.submit_raw_job(b"x", None, "doc", "RAW", &JobOptions::new())
            .expect("submit");

        backend.set_default_printer(Some("Label")).expect("default");
        raw.submit_raw_job(b"y", None, "doc", "RAW", &JobOptions::new())
            .expect("submit");

        // An unregistered default falls through to the first destination.
        backend.set_default_printer(Some("Gone")).expect("default");
        raw.submit_raw_job(b"z", None, "doc", "RAW", &JobOptions::new())
            .expect("submit");

        let printers: Vec<_> = backend
            .submissions()
            .expect("submissions")
            .into_iter()
            .map(|s| s.printer)
            .collect();
        assert_eq!(printers, ["Office", "Label", "Office"]);
    }

    #[test]
    fn raw_job_without_any_destination_fails() {
        let backend = MemoryBackend::default();
        let err = backend
            .submit_raw_job(b"x", None, "doc", "RAW", &JobOptions::new())
            .unwrap_err();
        assert!(matches!(err, SpoolgateError::Backend(ref msg) if msg == NO_DEFAULT_DESTINATION));
    }

    #[test]
    fn completed_job_leaves_active_list() {
        let backend = MemoryBackend::new(office_fixture());
        let id = backend
            .submit_raw_job(b"x", Some("Office"), "doc", "RAW", &JobOptions::new())
            .expect("submit")
            .expect("job id");
        backend.complete_job("Office", id).expect("complete");

        let job = backend.job("Office", id).expect("job").expect("still known");
        assert_eq!(job.status, ["COMPLETED"]);
        assert!(job.completed_time.is_some());
        assert!(backend.list_printers().expect("list")[0].jobs.is_empty());
        assert!(!backend.set_job("Office", id, "PAUSE").expect("pause"));
        assert!(matches!(
            backend.complete_job("Office", JobId(999)),
            Err(SpoolgateError::JobNotFound { .. })
        ));
    }

    #[test]
    fn delete_forgets_the_job() {
        let backend = MemoryBackend::new(office_fixture());
        let id = backend
            .submit_raw_job(b"x", Some("Office"), "doc", "RAW", &JobOptions::new())
            .expect("submit")
            .expect("job id");
        assert!(backend.set_job("Office", id, "DELETE").expect("delete"));
        assert!(backend.job("Office", id).expect("job").is_none());
        assert!(!backend.set_job("Office", id, "DELETE").expect("delete again"));
    }

    #[test]
    fn unknown_job_command_is_backend_error() {
        let backend = MemoryBackend::new(office_fixture());
        let err = backend.set_job("Office", JobId(1), "EXPLODE").unwrap_err();
        assert!(matches!(err, SpoolgateError::Backend(_)));
    }

    #[test]
    fn driver_options_for_unknown_printer_is_not_found() {
        let backend = MemoryBackend::new(office_fixture());
        assert!(matches!(
            backend.driver_options("Nowhere"),
            Err(SpoolgateError::PrinterNotFound(_))
        ));
        assert!(backend.driver_options("Label").expect("label").is_empty());
    }

    #[test]
    fn fixture_loads_from_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "defaultPrinter": null,
                "printers": [{{"name": "A"}}, {{"name": "B", "isDefault": true}}],
                "driverOptions": {{"B": {{"PageSize": {{"A4": false, "Letter": true}}}}}}
            }}"#
        )
        .expect("write");

        let backend = MemoryBackend::from_fixture_file(file.path()).expect("load");
        assert_eq!(backend.default_printer_name().expect("default"), None);
        assert_eq!(backend.list_printers().expect("list").len(), 2);
        assert_eq!(
            backend.supported_job_commands().expect("commands"),
            default_job_commands()
        );
    }

    #[test]
    fn broken_fixture_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        assert!(matches!(
            MemoryBackend::from_fixture_file(file.path()),
            Err(SpoolgateError::Configuration(_))
        ));
    }
}
