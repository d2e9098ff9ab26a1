//! Edge detection on the IR receiver input.
//!
//! The capture algorithm only talks to [`EdgeSource`]. [`PollingSensor`]
//! implements it by spinning on a GPIO and a [`Clock`]; a target that wants
//! to yield between polls, or to read edges from a capture peripheral, can
//! provide its own implementation without touching the algorithm.

use embedded_hal::digital::{InputPin, PinState};

use crate::clock::{elapsed, Clock};

/// Outcome of waiting for the start condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartResult {
    /// The sensor reached the active level.
    Detected,
    /// Nothing arrived within the user timeout.
    Timeout,
}

/// Outcome of waiting for the next transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeResult {
    /// The sensor reached the expected level after `elapsed_us`.
    Edge { elapsed_us: u32 },
    /// No transition within the edge timeout: the transmission is over.
    Timeout,
}

/// Blocking source of signal transitions.
pub trait EdgeSource {
    type Error;

    /// Block until the input reads `level` or `timeout_ms` elapses.
    fn wait_for_start(&mut self, level: PinState, timeout_ms: u32) -> Result<StartResult, Self::Error>;

    /// Block until the input reads `level` or `timeout_us` elapses.
    ///
    /// The elapsed time is measured from the moment of the call.
    fn wait_for_edge(&mut self, level: PinState, timeout_us: u32) -> Result<EdgeResult, Self::Error>;

    /// Current time in microseconds, used to timestamp diagnostics.
    fn now_us(&self) -> u32;
}

/// Busy-polling edge source over a GPIO input.
pub struct PollingSensor<P, C> {
    pin: P,
    clock: C,
}

impl<P: InputPin, C: Clock> PollingSensor<P, C> {
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Sample the input once.
    #[inline]
    pub fn level(&mut self) -> Result<PinState, P::Error> {
        Ok(PinState::from(self.pin.is_high()?))
    }

    /// Give back the pin and clock.
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

impl<P: InputPin, C: Clock> EdgeSource for PollingSensor<P, C> {
    type Error = P::Error;

    fn wait_for_start(&mut self, level: PinState, timeout_ms: u32) -> Result<StartResult, Self::Error> {
        let start = self.clock.now_ms();
        loop {
            if elapsed(start, self.clock.now_ms()) >= timeout_ms {
                return Ok(StartResult::Timeout);
            }
            if self.level()? == level {
                return Ok(StartResult::Detected);
            }
        }
    }

    fn wait_for_edge(&mut self, level: PinState, timeout_us: u32) -> Result<EdgeResult, Self::Error> {
        let start = self.clock.now_us();
        loop {
            let waited = elapsed(start, self.clock.now_us());
            if waited >= timeout_us {
                return Ok(EdgeResult::Timeout);
            }
            if self.level()? == level {
                return Ok(EdgeResult::Edge { elapsed_us: waited });
            }
        }
    }

    #[inline]
    fn now_us(&self) -> u32 {
        self.clock.now_us()
    }
}
