// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default printer resolution.
//
// The spooler's own answer wins.  Some spoolers only report the system-wide
// default (CUPS ignores the lpoptions default in `cupsGetDefault2`), so when
// they report nothing we fall back to the first destination whose per-printer
// default flag is set.

use tracing::debug;

use spoolgate_backend::{PrintBackend, PrinterDirectory};
use spoolgate_core::Printer;
use spoolgate_core::error::Result;

use crate::normalize::normalize_printers;

/// Resolve the default printer, or `None` if nothing qualifies.
pub fn resolve_default_printer(backend: &dyn PrintBackend) -> Result<Option<String>> {
    if let Some(name) = backend.default_printer_name()?.filter(|n| !n.is_empty()) {
        debug!(printer = %name, "default printer reported by spooler");
        return Ok(Some(name));
    }

    let mut printers = backend.list_printers()?;
    normalize_printers(&mut printers);
    let fallback = first_flagged_default(&printers);
    debug!(printer = ?fallback, scanned = printers.len(), "default printer from destination flags");
    Ok(fallback)
}

/// First destination carrying the default flag.
pub fn first_flagged_default(printers: &[Printer]) -> Option<String> {
    printers
        .iter()
        .find(|p| p.is_default)
        .map(|p| p.name.clone())
}

/// Use the requested printer when one is named, the default otherwise.
pub fn resolve_printer(
    backend: &dyn PrintBackend,
    requested: Option<&str>,
) -> Result<Option<String>> {
    match requested.filter(|name| !name.is_empty()) {
        Some(name) => Ok(Some(name.to_string())),
        None => resolve_default_printer(backend),
    }
}
