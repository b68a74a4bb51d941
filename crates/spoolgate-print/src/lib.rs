// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolgate Print: printer metadata normalization, default-printer
// resolution, driver option inspection, and job submission on top of a
// `spoolgate-backend` spooler binding.

pub mod driver_options;
pub mod facade;
pub mod nonblocking;
pub mod normalize;
pub mod orchestrator;
pub mod resolver;

pub use facade::PrinterFacade;
pub use nonblocking::AsyncPrinterFacade;
pub use orchestrator::{PrintOrchestrator, SubmissionOutcome, parse_job_id};
