//! Module: capture
//!
//! Purpose: Record a raw IR transmission as a run of quantized edge
//! durations.
//!
//! Architecture:
//! ```text
//!  sensor      ‾‾‾‾\____/‾‾‾\______/‾‾\__/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//!                  ^    ^   ^      ^  ^  ^
//!                start  e0  e1     e2 e3 e4      edge timeout
//!  buffer            [ t0 | t1 |  t2  |t3|t4 ]  -> edge count 5
//! ```
//! 1. Wait (ms clock) for the active level or the user timeout.
//! 2. For each slot, wait (µs clock) for the expected level or the edge
//!    timeout. An edge stores `elapsed / scale` and flips the expected
//!    level; a timeout ends the capture.
//!
//! Safety: Safe. No allocation, blocks the calling thread for the whole
//! capture.

use crate::config::IrConfig;
use crate::error::{CaptureError, ConfigError};
use crate::logging::LogStream;
use crate::sensor::{EdgeResult, EdgeSource, StartResult};
use crate::timing::{quantize, TimingBuffer};

/// What a call to `record_signal` produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No start condition within the user timeout. The buffer still holds
    /// the previous capture.
    NoSignal,
    /// A transmission was recorded; the buffer holds `edges` entries.
    ///
    /// `full` is set when every slot was used before the signal went quiet;
    /// any further edges were not recorded.
    Captured { edges: usize, full: bool },
}

impl CaptureOutcome {
    /// Edges recorded by this call (0 for `NoSignal`).
    pub fn edges(&self) -> usize {
        match self {
            Self::NoSignal => 0,
            Self::Captured { edges, .. } => *edges,
        }
    }
}

/// Records IR transmissions into a [`TimingBuffer`].
pub struct EdgeCapturer<'a, S> {
    source: S,
    config: IrConfig,
    log: Option<&'a LogStream>,
}

impl<'a, S: EdgeSource> EdgeCapturer<'a, S> {
    /// Fails if `config` does not pass [`IrConfig::validate`].
    pub fn new(source: S, config: IrConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            log: None,
        })
    }

    /// Send diagnostics (start, timeout, edge count) to `log`.
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = Some(log);
        self
    }

    pub fn config(&self) -> &IrConfig {
        &self.config
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give back the edge source.
    pub fn release(self) -> S {
        self.source
    }

    /// Wait for a transmission and record its edges.
    ///
    /// On `NoSignal` the buffer is left untouched so the last good capture
    /// stays replayable. Once the start condition is seen the buffer is
    /// cleared and refilled; if the sensor fails mid-capture it holds the
    /// edges recorded up to the failure.
    pub fn record_signal<const N: usize>(
        &mut self,
        buffer: &mut TimingBuffer<N>,
    ) -> Result<CaptureOutcome, CaptureError<S::Error>> {
        let start = self
            .source
            .wait_for_start(self.config.active_level, self.config.user_timeout_ms)
            .map_err(|e| self.pin_failed(e))?;

        if start == StartResult::Timeout {
            if let Some((log, now)) = self.log_at() {
                crate::rt_warn!(log, now, "User timeout");
            }
            return Ok(CaptureOutcome::NoSignal);
        }
        if let Some((log, now)) = self.log_at() {
            crate::rt_info!(log, now, "Start condition");
        }

        buffer.clear();
        let mut expected = self.config.idle_level();
        let mut full = true;

        for _ in 0..N {
            let result = self
                .source
                .wait_for_edge(expected, self.config.edge_timeout_us)
                .map_err(|e| self.pin_failed(e))?;

            match result {
                EdgeResult::Edge { elapsed_us } => {
                    buffer.push(quantize(elapsed_us, self.config.scale));
                    expected = !expected;
                }
                EdgeResult::Timeout => {
                    full = false;
                    break;
                }
            }
        }

        let edges = buffer.len();
        if let Some((log, now)) = self.log_at() {
            crate::rt_info!(log, now, "edges: {}", edges);
            if full {
                crate::rt_debug!(log, now, "buffer full at {} edges", N);
            }
        }

        Ok(CaptureOutcome::Captured { edges, full })
    }

    /// Diagnostic stream and the time to stamp on the next line.
    fn log_at(&self) -> Option<(&'a LogStream, u32)> {
        self.log.map(|log| (log, self.source.now_us()))
    }

    fn pin_failed(&self, err: S::Error) -> CaptureError<S::Error> {
        if let Some((log, now)) = self.log_at() {
            crate::rt_error!(log, now, "sensor read failed");
        }
        CaptureError::Pin(err)
    }
}
