//! Global log stream instance.

use crate::logging::LogStream;

/// Diagnostic stream for capture and replay.
///
/// Single producer (the thread running capture/replay), single consumer
/// (whoever calls `log_drain::drain_to` afterwards).
pub static IR_LOG_STREAM: LogStream = LogStream::new();
