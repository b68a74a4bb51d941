// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language descriptions of Spoolgate errors for command-line and
// desktop front ends.
//
// Every error maps to a one-line message, a suggestion, and a severity that
// front ends use to decide how loudly to report it.

use crate::error::SpoolgateError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Spooler busy or momentarily unreachable; trying again may work.
    Transient,
    /// The user must change something (pick a printer, fix a path, refill).
    ActionRequired,
    /// Retrying will not help: missing backend support, bad configuration.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable: severity == Severity::Transient,
            severity,
        }
    }
}

/// Convert a `SpoolgateError` into a `HumanError`.
pub fn humanize_error(err: &SpoolgateError) -> HumanError {
    match err {
        SpoolgateError::Configuration(detail) => HumanError::new(
            "No print system is available.",
            format!("Check the backend setting in your configuration. ({detail})"),
            Severity::Permanent,
        ),

        SpoolgateError::Unsupported(what) => HumanError::new(
            "This print system can't do that.",
            format!("The active backend has no support for {what}."),
            Severity::Permanent,
        ),

        SpoolgateError::PlatformUnavailable => HumanError::new(
            "Printing isn't available on this platform.",
            "Select a different backend, for example `--backend memory`.",
            Severity::Permanent,
        ),

        SpoolgateError::MissingFilename => HumanError::new(
            "No file was given to print.",
            "Pass the path of the file you want to print.",
            Severity::ActionRequired,
        ),

        SpoolgateError::NoPrinterSelected => HumanError::new(
            "No printer selected.",
            "Name a printer explicitly, or set a default printer in your system settings.",
            Severity::ActionRequired,
        ),

        SpoolgateError::InvalidRequest(detail) => HumanError::new(
            "The print request is malformed.",
            format!("Fix the request and try again. ({detail})"),
            Severity::ActionRequired,
        ),

        SpoolgateError::Backend(detail) => humanize_backend_error(detail),

        SpoolgateError::PrinterNotFound(name) => HumanError::new(
            "That printer doesn't exist.",
            format!("No printer named '{name}' is registered. Run `spoolgate list` to see the available printers."),
            Severity::ActionRequired,
        ),

        SpoolgateError::JobNotFound { printer, job_id } => HumanError::new(
            "That print job doesn't exist.",
            format!("Job {job_id} is not queued on '{printer}'. It may already have finished."),
            Severity::ActionRequired,
        ),

        SpoolgateError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError::new(
                "The file couldn't be found.",
                "It may have been moved or deleted. Check the path and try again.",
                Severity::ActionRequired,
            ),
            std::io::ErrorKind::PermissionDenied => HumanError::new(
                "Permission to read that file was denied.",
                "Check the file permissions, or copy the file somewhere readable first.",
                Severity::ActionRequired,
            ),
            _ => HumanError::new(
                "There was a problem reading or writing a file.",
                "Try again. If this keeps happening, check free disk space.",
                Severity::Transient,
            ),
        },

        SpoolgateError::Serialization(detail) => HumanError::new(
            "A configuration or data file is not valid JSON.",
            format!("Fix the file and try again. ({detail})"),
            Severity::ActionRequired,
        ),
    }
}

/// Spooler diagnostics arrive as free text; pick out the common cases.
fn humanize_backend_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("timed out") || lower.contains("unable to connect") {
        HumanError::new(
            "The print spooler didn't respond.",
            "Make sure the print service is running, then try again.",
            Severity::Transient,
        )
    } else if lower.contains("no such file") || lower.contains("file not found") {
        HumanError::new(
            "The spooler couldn't open the file.",
            format!("Check that the file exists and is readable. ({detail})"),
            Severity::ActionRequired,
        )
    } else if lower.contains("forbidden") || lower.contains("not-authorized") {
        HumanError::new(
            "You aren't allowed to print there.",
            "Ask an administrator to grant access to this printer.",
            Severity::ActionRequired,
        )
    } else if lower.contains("media-empty") || lower.contains("out of paper") {
        HumanError::new(
            "The printer is out of paper.",
            "Add paper to the tray and resume the printer.",
            Severity::ActionRequired,
        )
    } else if lower.contains("not-accepting") || lower.contains("stopped") {
        HumanError::new(
            "The printer isn't accepting jobs.",
            "Resume or enable the printer queue, then try again.",
            Severity::ActionRequired,
        )
    } else if lower.contains("document-format") {
        HumanError::new(
            "The printer doesn't understand this data.",
            "Send a format the printer supports; `spoolgate formats` lists them.",
            Severity::Permanent,
        )
    } else {
        HumanError::new(
            "The print spooler reported a problem.",
            format!("Try again. (Detail: {detail})"),
            Severity::Transient,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_printer_is_action_required() {
        let human = humanize_error(&SpoolgateError::NoPrinterSelected);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn unsupported_is_permanent() {
        let human = humanize_error(&SpoolgateError::Unsupported("raw job submission".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("raw job submission"));
    }

    #[test]
    fn spooler_timeout_is_transient() {
        let err = SpoolgateError::Backend("cupsd: Unable to connect to server".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn missing_spool_file_is_action_required() {
        let err = SpoolgateError::Backend("report.pdf: No such file or directory".into());
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }
}
