//! Diagnostic log stream for the capture path.
//!
//! ```text
//! Capture loop            LogStream             Caller / console
//! ────────────            ─────────             ────────────────
//!
//! rt_info!() ──────────▶ [L0][L1][L2] ──────▶ log_drain::drain_to()
//! no alloc               lock-free ring        after the timing loop
//! never blocks           drops when full
//! ```
//!
//! Formatting happens into a stack buffer; nothing here allocates or
//! blocks, so a diagnostic line can be pushed right before or after a
//! timing-critical loop without disturbing it. Lines are purely
//! observational: nothing in the crate reads them back.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 64;

/// Log buffer size (number of entries).
pub const LOG_BUFFER_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single diagnostic line.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds (wrapping clock).
    pub timestamp_us: u32,
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text. Truncation can split a UTF-8 sequence; invalid tails
    /// are cut off.
    pub fn text(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One ring slot.
///
/// `stamp` holds the slot's sequence number minus its index, so a fresh
/// ring is all zeros. Sequence `pos` means free for the producer at `pos`,
/// `pos + 1` means written and waiting for the consumer at `pos`.
struct Slot {
    stamp: AtomicU32,
    entry: UnsafeCell<LogEntry>,
}

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: Slot = Slot {
    stamp: AtomicU32::new(0),
    entry: UnsafeCell::new(LogEntry::EMPTY),
};

/// Lock-free bounded log ring.
///
/// - Producers and consumers claim positions with a compare-exchange, so
///   any number of threads may push or drain concurrently
/// - Push never blocks (drops message if full)
/// - Drain runs wherever blocking I/O is acceptable
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: a slot's entry is only touched by the thread that won the claim
// on its position, and the slot sequence hands it over with Release/Acquire.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");
        assert!(N <= i32::MAX as usize, "Log buffer too large");

        Self {
            slots: [EMPTY_SLOT; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    #[inline]
    fn sequence(&self, idx: usize) -> u32 {
        self.slots[idx].stamp.load(Ordering::Acquire).wrapping_add(idx as u32)
    }

    #[inline]
    fn set_sequence(&self, idx: usize, seq: u32) {
        self.slots[idx]
            .stamp
            .store(seq.wrapping_sub(idx as u32), Ordering::Release);
    }

    /// Queue a message. Returns `false` if it was dropped (ring full).
    #[inline]
    pub fn push(&self, timestamp_us: u32, level: LogLevel, msg: &[u8]) -> bool {
        let mut pos = self.write_idx.load(Ordering::Relaxed);
        let idx = loop {
            let idx = (pos as usize) & Self::MASK;
            let lag = self.sequence(idx).wrapping_sub(pos) as i32;

            if lag == 0 {
                match self.write_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break idx,
                    Err(current) => pos = current,
                }
            } else if lag < 0 {
                // Slot still holds the entry from one lap ago.
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            } else {
                pos = self.write_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: position `pos` was claimed by this call only
        unsafe {
            let entry = &mut *self.slots[idx].entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.set_sequence(idx, pos.wrapping_add(1));
        true
    }

    /// Pop the oldest entry, if any.
    ///
    /// Returns `None` while the oldest claimed slot is still being written.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let mut pos = self.read_idx.load(Ordering::Relaxed);
        let idx = loop {
            let idx = (pos as usize) & Self::MASK;
            let lag = self.sequence(idx).wrapping_sub(pos.wrapping_add(1)) as i32;

            if lag == 0 {
                match self.read_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => break idx,
                    Err(current) => pos = current,
                }
            } else if lag < 0 {
                return None;
            } else {
                pos = self.read_idx.load(Ordering::Relaxed);
            }
        };

        // SAFETY: position `pos` was claimed by this call only
        let entry = unsafe { *self.slots[idx].entry.get() };

        self.set_sequence(idx, pos.wrapping_add(N as u32));
        Some(entry)
    }

    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer, truncating at the end.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for BufWriter<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let to_write = bytes.len().min(self.buf.len() - self.pos);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Push a formatted line without allocating.
///
/// ```ignore
/// rt_log!(LogLevel::Info, IR_LOG_STREAM, now_us, "edges: {}", n);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
