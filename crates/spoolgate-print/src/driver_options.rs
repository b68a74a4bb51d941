// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Driver option introspection.
//
// Driver dumps map each option (`PageSize`, `Resolution`, `InputSlot`, ...) to
// its supported values and a "selected" flag.  Scans follow the order the
// spooler reported; if a driver marks several values selected, the last one
// wins.

use tracing::debug;

use spoolgate_backend::{PrintBackend, PrinterDirectory};
use spoolgate_core::error::{Result, SpoolgateError};
use spoolgate_core::{DriverOptions, PAGE_SIZE_OPTION};

use crate::resolver::resolve_printer;

/// The selected value of a driver option, if any.
pub fn selected_option(options: &DriverOptions, key: &str) -> Option<String> {
    options
        .get(key)?
        .iter()
        .rfind(|(_, selected)| **selected)
        .map(|(value, _)| value.clone())
}

/// The selected paper size, or an empty string when none is selected.
pub fn selected_paper_size(options: &DriverOptions) -> String {
    selected_option(options, PAGE_SIZE_OPTION).unwrap_or_default()
}

/// Fetch the driver dump for `printer`, or for the default printer.
pub fn fetch_driver_options(
    backend: &dyn PrintBackend,
    printer: Option<&str>,
) -> Result<DriverOptions> {
    let name = resolve_printer(backend, printer)?.ok_or(SpoolgateError::NoPrinterSelected)?;
    let options = backend.driver_options(&name)?;
    debug!(printer = %name, options = options.len(), "driver options fetched");
    Ok(options)
}

/// Paper size selected in the driver of `printer` (or the default printer).
pub fn fetch_selected_paper_size(
    backend: &dyn PrintBackend,
    printer: Option<&str>,
) -> Result<String> {
    let options = fetch_driver_options(backend, printer)?;
    Ok(selected_paper_size(&options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use spoolgate_backend::{MemoryBackend, MemoryFixture};
    use spoolgate_core::Printer;

    fn choices(entries: &[(&str, bool)]) -> IndexMap<String, bool> {
        entries
            .iter()
            .map(|(name, selected)| (name.to_string(), *selected))
            .collect()
    }

    fn dump(page_sizes: &[(&str, bool)]) -> DriverOptions {
        let mut options = DriverOptions::new();
        options.insert("PageSize".into(), choices(page_sizes));
        options.insert(
            "Resolution".into(),
            choices(&[("300dpi", false), ("600dpi", true)]),
        );
        options
    }

    #[test]
    fn selected_page_size_found() {
        let options = dump(&[("Letter", false), ("A4", true), ("Legal", false)]);
        assert_eq!(selected_paper_size(&options), "A4");
    }

    #[test]
    fn last_selected_wins() {
        let options = dump(&[("A4", true), ("Letter", true), ("Legal", false)]);
        assert_eq!(selected_paper_size(&options), "Letter");
    }

    #[test]
    fn nothing_selected_is_empty() {
        let options = dump(&[("A4", false), ("Letter", false)]);
        assert_eq!(selected_paper_size(&options), "");
    }

    #[test]
    fn missing_page_size_is_empty() {
        assert_eq!(selected_paper_size(&DriverOptions::new()), "");
    }

    #[test]
    fn other_options_use_the_same_scan() {
        let options = dump(&[("A4", true)]);
        assert_eq!(selected_option(&options, "Resolution"), Some("600dpi".into()));
        assert_eq!(selected_option(&options, "InputSlot"), None);
    }

    fn office_backend(default: Option<&str>) -> MemoryBackend {
        let mut fixture = MemoryFixture {
            default_printer: default.map(str::to_string),
            printers: vec![Printer::new("Office"), Printer::new("Label")],
            ..MemoryFixture::default()
        };
        fixture
            .driver_options
            .insert("Office".into(), dump(&[("Letter", false), ("A4", true)]));
        fixture
            .driver_options
            .insert("Label".into(), dump(&[("w4h6", true)]));
        MemoryBackend::new(fixture)
    }

    #[test]
    fn paper_size_of_default_printer() {
        let backend = office_backend(Some("Office"));
        assert_eq!(fetch_selected_paper_size(&backend, None).unwrap(), "A4");
        assert_eq!(
            fetch_selected_paper_size(&backend, Some("Label")).unwrap(),
            "w4h6"
        );
    }

    #[test]
    fn no_resolvable_printer_is_an_error() {
        let backend = office_backend(None);
        assert!(matches!(
            fetch_driver_options(&backend, None),
            Err(SpoolgateError::NoPrinterSelected)
        ));
    }
}
