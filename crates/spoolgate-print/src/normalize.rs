// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer record normalization.
//
// Spoolers report state as a raw `printer-state` option (IPP codes 3/4/5) and
// timestamps as epoch seconds.  Normalization turns the code into a
// `PrinterStatus` and every `*time` option into a real timestamp, once: a
// record that already carries a status is left untouched, which makes the
// pass idempotent.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use spoolgate_core::{OptionValue, PRINTER_STATE_OPTION, Printer, PrinterStatus};

/// Option keys ending with this suffix hold epoch-second timestamps.
const TIME_SUFFIX: &str = "time";

/// Normalize a single printer record in place.
pub fn normalize_printer(printer: &mut Printer) {
    if printer.status.as_ref().is_some_and(|s| !s.is_blank()) {
        return;
    }
    let Some(state) = printer
        .options
        .get(PRINTER_STATE_OPTION)
        .filter(|v| !v.is_empty())
    else {
        return;
    };

    let status = status_from_state_code(&state.to_raw_string());
    coerce_timestamps(&mut printer.options);

    debug!(printer = %printer.name, %status, "printer record normalized");
    printer.status = Some(status);
}

/// Normalize every record of a listing.
pub fn normalize_printers(printers: &mut [Printer]) {
    printers.iter_mut().for_each(normalize_printer);
}

/// Translate an IPP `printer-state` code.  Unknown codes pass through.
pub fn status_from_state_code(code: &str) -> PrinterStatus {
    match code {
        "3" => PrinterStatus::Idle,
        "4" => PrinterStatus::Printing,
        "5" => PrinterStatus::Stopped,
        other => PrinterStatus::Other(other.to_string()),
    }
}

/// Replace every non-empty `*time` option with the timestamp it encodes.
/// Values that are not numbers are kept as reported.
fn coerce_timestamps(options: &mut IndexMap<String, OptionValue>) {
    for (key, value) in options.iter_mut() {
        if !key.ends_with(TIME_SUFFIX) || value.is_empty() || value.as_timestamp().is_some() {
            continue;
        }
        if let Some(ts) = epoch_seconds_to_datetime(value) {
            *value = OptionValue::Timestamp(ts);
        }
    }
}

/// Interpret a scalar as POSIX epoch seconds.  Fractional seconds keep
/// millisecond precision.
pub fn epoch_seconds_to_datetime(value: &OptionValue) -> Option<DateTime<Utc>> {
    match value {
        OptionValue::Number(secs) => DateTime::from_timestamp(*secs, 0),
        OptionValue::Float(secs) => fractional_seconds(*secs),
        OptionValue::Text(text) => {
            let text = text.trim();
            if let Ok(secs) = text.parse::<i64>() {
                return DateTime::from_timestamp(secs, 0);
            }
            fractional_seconds(text.parse().ok()?)
        }
        OptionValue::Timestamp(ts) => Some(*ts),
        OptionValue::Flag(_) => None,
    }
}

fn fractional_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
}
