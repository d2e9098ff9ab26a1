//! RustIrRemote - firmware harness
//!
//! Minimal bring-up for an ESP32-S3 board:
//! 1. Sensor GPIO as input with pull-up
//! 2. LEDC channel at the carrier frequency on the emitter GPIO
//! 3. Loop: record, print diagnostics, replay what was captured
//!
//! Deciding *when* to record or replay, and storing codes, belongs to the
//! application that embeds the library; this loop only exercises it.

#[cfg(target_os = "espidf")]
fn main() {
    esp_idf_svc::sys::link_patches();

    println!("{}", env!("VERSION_STRING"));

    if let Err(e) = firmware::run() {
        println!("fatal: {:?}", e);
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("{}: firmware harness requires an ESP-IDF target", env!("VERSION_STRING"));
}

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
    use esp_idf_svc::hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::sys::EspError;

    use rust_ir_remote::{
        clock::EspClock,
        log_drain::drain_to,
        CaptureOutcome, CarrierEmitter, ConfigError, EdgeCapturer, EdgeReplayer, IrConfig, IrPins,
        PollingSensor, TimingBuffer, IR_LOG_STREAM,
    };

    /// Pause between record/replay cycles.
    const CYCLE_PAUSE_MS: u32 = 1000;

    /// Bring-up failure.
    #[derive(Debug)]
    pub enum FatalError {
        Esp(EspError),
        Config(ConfigError),
    }

    impl From<EspError> for FatalError {
        fn from(e: EspError) -> Self {
            Self::Esp(e)
        }
    }

    impl From<ConfigError> for FatalError {
        fn from(e: ConfigError) -> Self {
            Self::Config(e)
        }
    }

    pub fn run() -> Result<(), FatalError> {
        let config = IrConfig::DEFAULT;
        let pins = IrPins::default();
        config.validate()?;

        let peripherals = Peripherals::take()?;

        // SAFETY: these GPIOs are not handed out anywhere else.
        let sensor_gpio = unsafe { AnyIOPin::new(pins.sensor_pin) };
        let emitter_gpio = unsafe { AnyOutputPin::new(pins.emitter_pin) };

        let mut sensor_pin = PinDriver::input(sensor_gpio)?;
        sensor_pin.set_pull(Pull::Up)?;

        let timer = LedcTimerDriver::new(
            peripherals.ledc.timer0,
            &TimerConfig::new().frequency(Hertz(pins.carrier_hz)),
        )?;
        let mut pwm = LedcDriver::new(peripherals.ledc.channel0, &timer, emitter_gpio)?;
        pwm.set_duty(0)?;

        let emitter =
            CarrierEmitter::with_duty(pwm, config.carrier_duty_num, config.carrier_duty_den)?;

        let mut capturer = EdgeCapturer::new(PollingSensor::new(sensor_pin, EspClock), config)?
            .with_log(&IR_LOG_STREAM);
        let mut replayer = EdgeReplayer::new(emitter, EspClock, &config)?;
        let mut buffer: TimingBuffer = TimingBuffer::new();

        loop {
            let outcome = capturer.record_signal(&mut buffer);
            flush_log();

            match outcome {
                Ok(CaptureOutcome::Captured { edges, .. }) if edges > 0 => {
                    // Let the sender go quiet before we answer.
                    FreeRtos::delay_ms(CYCLE_PAUSE_MS);
                    match replayer.replay_signal(&buffer) {
                        Ok(report) => println!(
                            "replayed {} edges in {} us",
                            report.edges, report.elapsed_us
                        ),
                        Err(e) => println!("replay: {}", e),
                    }
                }
                Ok(_) => {}
                Err(e) => println!("capture: {}", e),
            }

            FreeRtos::delay_ms(CYCLE_PAUSE_MS);
        }
    }

    fn flush_log() {
        let mut text = String::new();
        drain_to(&IR_LOG_STREAM, &mut text);
        print!("{}", text);
    }
}
