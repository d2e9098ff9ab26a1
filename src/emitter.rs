//! IR LED output.
//!
//! The replayer needs three things from the emitter: start the carrier,
//! stop it, and hold the LED dark. [`CarrierEmitter`] provides all three on
//! top of any PWM channel (e.g. an ESP32 LEDC channel running at 38 kHz).

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ConfigError;

/// Output stage driven by the replayer.
pub trait IrEmitter {
    type Error;

    /// Begin pulsing the LED at the carrier frequency.
    fn start_carrier(&mut self) -> Result<(), Self::Error>;

    /// End a carrier burst.
    fn stop_carrier(&mut self) -> Result<(), Self::Error>;

    /// Drive the LED to its steady off level.
    fn set_inactive(&mut self) -> Result<(), Self::Error>;
}

impl<T: IrEmitter + ?Sized> IrEmitter for &mut T {
    type Error = T::Error;

    #[inline]
    fn start_carrier(&mut self) -> Result<(), Self::Error> {
        (**self).start_carrier()
    }

    #[inline]
    fn stop_carrier(&mut self) -> Result<(), Self::Error> {
        (**self).stop_carrier()
    }

    #[inline]
    fn set_inactive(&mut self) -> Result<(), Self::Error> {
        (**self).set_inactive()
    }
}

/// Emitter backed by a PWM channel whose frequency is the IR carrier.
///
/// Active = fixed duty fraction, inactive = fully off.
pub struct CarrierEmitter<P> {
    pwm: P,
    duty_num: u16,
    duty_den: u16,
}

impl<P: SetDutyCycle> CarrierEmitter<P> {
    /// Emitter with a 50% duty carrier.
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            duty_num: 1,
            duty_den: 2,
        }
    }

    /// Emitter with a `num / den` duty carrier.
    ///
    /// Zero, zero-denominator and above-100% fractions are rejected with
    /// `ConfigError::InvalidDuty`.
    pub fn with_duty(pwm: P, num: u8, den: u8) -> Result<Self, ConfigError> {
        if den == 0 || num == 0 || num > den {
            return Err(ConfigError::InvalidDuty);
        }
        Ok(Self {
            pwm,
            duty_num: num as u16,
            duty_den: den as u16,
        })
    }

    /// Give back the PWM channel.
    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> IrEmitter for CarrierEmitter<P> {
    type Error = P::Error;

    #[inline]
    fn start_carrier(&mut self) -> Result<(), Self::Error> {
        self.pwm.set_duty_cycle_fraction(self.duty_num, self.duty_den)
    }

    #[inline]
    fn stop_carrier(&mut self) -> Result<(), Self::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }

    #[inline]
    fn set_inactive(&mut self) -> Result<(), Self::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }
}
