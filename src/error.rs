//! Error types for capture, replay and configuration.
//!
//! Timeouts are not errors: a missing start condition or the silence at the
//! end of a transmission are reported through `CaptureOutcome`. Only
//! hardware failures from the pin and PWM drivers end up here.

/// Capture failed because the sensor pin could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError<E> {
    /// E10: sensor pin read error
    Pin(E),
}

impl<E> CaptureError<E> {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pin(_) => "E10",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Pin(_) => "sensor read failed",
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for CaptureError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "{}: {} ({:?})", self.code(), self.message(), e),
        }
    }
}

/// Replay failed because the emitter rejected a command.
///
/// The replayer still attempts to drive the emitter inactive before
/// returning this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError<E> {
    /// E20: emitter write error
    Emitter(E),
}

impl<E> ReplayError<E> {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Emitter(_) => "E20",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Emitter(_) => "emitter write failed",
        }
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for ReplayError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Emitter(e) => write!(f, "{}: {} ({:?})", self.code(), self.message(), e),
        }
    }
}

/// Rejected `IrConfig` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// E30: scale factor is zero
    InvalidScale,
    /// E31: a timeout is zero
    InvalidTimeout,
    /// E32: carrier duty is zero, above 100% or has a zero denominator
    InvalidDuty,
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidScale => "E30",
            Self::InvalidTimeout => "E31",
            Self::InvalidDuty => "E32",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidScale => "scale must be non-zero",
            Self::InvalidTimeout => "timeout must be non-zero",
            Self::InvalidDuty => "invalid carrier duty",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let e: CaptureError<u8> = CaptureError::Pin(7);
        assert_eq!(format!("{}", e), "E10: sensor read failed (7)");

        let e: ReplayError<()> = ReplayError::Emitter(());
        assert_eq!(format!("{}", e), "E20: emitter write failed (())");

        assert_eq!(format!("{}", ConfigError::InvalidDuty), "E32: invalid carrier duty");
    }
}
