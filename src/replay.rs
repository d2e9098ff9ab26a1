//! Module: replay
//!
//! Purpose: Re-emit a captured transmission through the IR LED.
//!
//! Architecture:
//! - Entries alternate burst / gap, starting with a burst
//! - Burst: carrier on, spin for `units * scale` µs, carrier off
//! - Gap: LED held off, spin for `units * scale` µs
//! - Each entry is timed from its own start, so output-switching overhead
//!   is absorbed into the entry instead of accumulating
//! - The LED is always forced off at the end, whatever happened before
//!
//! Safety: Safe. No allocation, no abort: blocks for the whole signal.

use crate::clock::{elapsed, spin_until, Clock};
use crate::config::IrConfig;
use crate::emitter::IrEmitter;
use crate::error::{ConfigError, ReplayError};
use crate::timing::TimingBuffer;

/// Summary of a finished replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayReport {
    /// Entries emitted (the buffer's edge count).
    pub edges: usize,
    /// Wall time spent emitting, in microseconds.
    pub elapsed_us: u32,
}

/// Drives an [`IrEmitter`] from a [`TimingBuffer`].
pub struct EdgeReplayer<E, C> {
    emitter: E,
    clock: C,
    scale: u32,
}

impl<E: IrEmitter, C: Clock> EdgeReplayer<E, C> {
    /// `config.scale` must match the one used for capture.
    ///
    /// Fails if `config` does not pass [`IrConfig::validate`].
    pub fn new(emitter: E, clock: C, config: &IrConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            emitter,
            clock,
            scale: config.scale,
        })
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    /// Give back the emitter and clock.
    pub fn release(self) -> (E, C) {
        (self.emitter, self.clock)
    }

    /// Emit every valid entry of `buffer`, then drive the LED inactive.
    ///
    /// An empty buffer only drives the LED inactive. If the emitter fails
    /// part-way, the LED is still driven inactive before the error is
    /// returned.
    pub fn replay_signal<const N: usize>(
        &mut self,
        buffer: &TimingBuffer<N>,
    ) -> Result<ReplayReport, ReplayError<E::Error>> {
        let started = self.clock.now_us();

        let emitted = self.emit(buffer);
        let cleanup = self.emitter.set_inactive();
        emitted?;
        cleanup.map_err(ReplayError::Emitter)?;

        Ok(ReplayReport {
            edges: buffer.len(),
            elapsed_us: elapsed(started, self.clock.now_us()),
        })
    }

    fn emit<const N: usize>(&mut self, buffer: &TimingBuffer<N>) -> Result<(), ReplayError<E::Error>> {
        let mut burst = true;

        for hold_us in buffer.durations_us(self.scale) {
            let entry_start = self.clock.now_us();

            if burst {
                self.emitter.start_carrier().map_err(ReplayError::Emitter)?;
                spin_until(&self.clock, entry_start, hold_us);
                self.emitter.stop_carrier().map_err(ReplayError::Emitter)?;
            } else {
                self.emitter.set_inactive().map_err(ReplayError::Emitter)?;
                spin_until(&self.clock, entry_start, hold_us);
            }

            burst = !burst;
        }

        Ok(())
    }
}
