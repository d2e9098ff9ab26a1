//! Module: config
//!
//! Purpose: Timing constants and pin assignments for IR capture/replay.
//!
//! Architecture:
//! - `IrConfig`: timeouts, quantization scale, polarity, carrier duty
//! - `IrPins`: board wiring used by the firmware harness
//! - All values `Copy`, built with `const fn` so they can live in statics
//!
//! Safety: Safe. No unsafe blocks.

use embedded_hal::digital::PinState;

use crate::error::ConfigError;

/// Capacity of the timing buffer (edges per captured code).
pub const MAX_EDGES: usize = 70;

/// Default quantization scale factor (µs per stored unit).
pub const DEFAULT_SCALE: u32 = 37;

/// Default wait for a transmission to start.
pub const DEFAULT_USER_TIMEOUT_MS: u32 = 10_000;

/// Default silence that ends a transmission.
pub const DEFAULT_EDGE_TIMEOUT_US: u32 = 10_000;

/// Capture and replay timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrConfig {
    /// Quantization scale factor (µs per stored unit). Must be non-zero.
    pub scale: u32,
    /// How long to wait for the start condition (ms).
    pub user_timeout_ms: u32,
    /// How long without a transition ends the capture (µs).
    pub edge_timeout_us: u32,
    /// Sensor level meaning "IR burst present".
    ///
    /// Typical demodulating receivers (TSOP family) pull LOW while a burst
    /// is present.
    pub active_level: PinState,
    /// Carrier duty cycle numerator.
    pub carrier_duty_num: u8,
    /// Carrier duty cycle denominator.
    pub carrier_duty_den: u8,
}

impl IrConfig {
    /// Defaults matching common 38 kHz remotes and TSOP receivers.
    pub const DEFAULT: Self = Self {
        scale: DEFAULT_SCALE,
        user_timeout_ms: DEFAULT_USER_TIMEOUT_MS,
        edge_timeout_us: DEFAULT_EDGE_TIMEOUT_US,
        active_level: PinState::Low,
        carrier_duty_num: 1,
        carrier_duty_den: 2,
    };

    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub const fn with_user_timeout_ms(mut self, ms: u32) -> Self {
        self.user_timeout_ms = ms;
        self
    }

    pub const fn with_edge_timeout_us(mut self, us: u32) -> Self {
        self.edge_timeout_us = us;
        self
    }

    pub const fn with_active_level(mut self, level: PinState) -> Self {
        self.active_level = level;
        self
    }

    pub const fn with_carrier_duty(mut self, num: u8, den: u8) -> Self {
        self.carrier_duty_num = num;
        self.carrier_duty_den = den;
        self
    }

    /// Sensor level while no burst is present.
    #[inline]
    pub fn idle_level(&self) -> PinState {
        !self.active_level
    }

    /// Check that the configuration can drive capture and replay.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::InvalidScale);
        }
        if self.user_timeout_ms == 0 || self.edge_timeout_us == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.carrier_duty_den == 0
            || self.carrier_duty_num == 0
            || self.carrier_duty_num > self.carrier_duty_den
        {
            return Err(ConfigError::InvalidDuty);
        }
        Ok(())
    }
}

impl Default for IrConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Board wiring for the IR sensor and emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrPins {
    /// GPIO connected to the demodulating receiver output.
    pub sensor_pin: i32,
    /// GPIO driving the IR LED (through a transistor).
    pub emitter_pin: i32,
    /// Carrier frequency for the LEDC channel.
    pub carrier_hz: u32,
}

impl Default for IrPins {
    fn default() -> Self {
        Self {
            sensor_pin: 4,
            emitter_pin: 5,
            carrier_hz: 38_000,
        }
    }
}
