//! Text output for the diagnostic log stream.
//!
//! Renders entries as `[timestamp_us] LEVEL: message` into any
//! `core::fmt::Write` sink. The firmware points this at stdout after each
//! capture or replay, never from inside a timing loop.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Write one entry, followed by a newline.
pub fn format_log_entry(entry: &LogEntry, out: &mut dyn Write) -> core::fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.text()
    )
}

/// Empty `stream` into `out`.
///
/// Reports (and resets) the drop counter as a trailing warning line.
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;
    while let Some(entry) = stream.drain() {
        let _ = format_log_entry(&entry, out);
        count += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped: {}", dropped);
        stream.reset_dropped();
    }

    count
}
