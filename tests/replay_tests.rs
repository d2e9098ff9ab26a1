//! Edge replayer tests

mod common;

use common::{
    receiver_waveform, Action, EmitFault, FakePwm, RecordingEmitter, SimClock, WaveformPin,
};
use embedded_hal::digital::PinState;
use rust_ir_remote::{
    CarrierEmitter, ConfigError, EdgeCapturer, EdgeReplayer, IrConfig, PollingSensor, ReplayError,
    TimingBuffer, MAX_EDGES,
};

/// Time between consecutive emitter commands.
fn spans(emitter: &RecordingEmitter) -> Vec<u32> {
    emitter
        .log
        .windows(2)
        .map(|w| w[1].1.wrapping_sub(w[0].1))
        .collect()
}

fn replayer_for(clock: &SimClock) -> EdgeReplayer<RecordingEmitter, SimClock> {
    EdgeReplayer::new(RecordingEmitter::new(clock), clock.clone(), &IrConfig::DEFAULT).unwrap()
}

fn assert_close(actual: u32, expected: u32) {
    assert!(
        actual >= expected && actual <= expected + 3,
        "span {} not within [{}, {}]",
        actual,
        expected,
        expected + 3
    );
}

#[test]
fn test_replay_scenario() {
    let clock = SimClock::new(1);
    let emitter = RecordingEmitter::new(&clock);
    let mut replayer = EdgeReplayer::new(emitter, clock.clone(), &IrConfig::DEFAULT).unwrap();
    let buffer: TimingBuffer = TimingBuffer::from_units(&[12, 5, 30, 2]);

    let report = replayer.replay_signal(&buffer).unwrap();
    let (emitter, _) = replayer.release();

    assert_eq!(
        emitter.actions(),
        vec![
            Action::CarrierOn,
            Action::CarrierOff,
            Action::Inactive,
            Action::CarrierOn,
            Action::CarrierOff,
            Action::Inactive,
            Action::Inactive,
        ]
    );

    let spans = spans(&emitter);
    assert_close(spans[0], 12 * 37); // burst
    assert_close(spans[2], 5 * 37); // gap
    assert_close(spans[3], 30 * 37); // burst
    assert_close(spans[5], 2 * 37); // gap, ended by the forced inactive

    assert_eq!(report.edges, 4);
    let total = (12 + 5 + 30 + 2) * 37;
    assert!(report.elapsed_us >= total && report.elapsed_us < total + 20);
}

#[test]
fn test_empty_buffer_only_forces_inactive() {
    let clock = SimClock::new(1);
    let mut replayer = replayer_for(&clock);
    let buffer: TimingBuffer = TimingBuffer::new();

    let report = replayer.replay_signal(&buffer).unwrap();

    assert_eq!(report.edges, 0);
    assert_eq!(replayer.emitter_mut().actions(), vec![Action::Inactive]);
}

#[test]
fn test_every_edge_count_ends_inactive() {
    for n in 0..=MAX_EDGES {
        let clock = SimClock::new(1);
        let mut replayer = replayer_for(&clock);
        let buffer: TimingBuffer = TimingBuffer::from_units(&vec![1; n]);

        let report = replayer.replay_signal(&buffer).unwrap();
        let emitter = replayer.emitter_mut();

        assert_eq!(report.edges, n);
        assert_eq!(emitter.count(Action::CarrierOn), (n + 1) / 2);
        assert_eq!(emitter.count(Action::CarrierOff), (n + 1) / 2);
        // One per gap plus the final cleanup.
        assert_eq!(emitter.count(Action::Inactive), n / 2 + 1);
        assert_eq!(emitter.actions().last(), Some(&Action::Inactive));
    }
}

#[test]
fn test_emitter_failure_still_forces_inactive() {
    let clock = SimClock::new(1);
    let mut emitter = RecordingEmitter::new(&clock);
    emitter.fail_carrier_on = Some(1);
    let mut replayer = EdgeReplayer::new(emitter, clock.clone(), &IrConfig::DEFAULT).unwrap();
    let buffer: TimingBuffer = TimingBuffer::from_units(&[3, 3, 3]);

    let result = replayer.replay_signal(&buffer);

    assert_eq!(result, Err(ReplayError::Emitter(EmitFault)));
    assert_eq!(
        replayer.emitter_mut().actions(),
        vec![Action::CarrierOn, Action::CarrierOff, Action::Inactive, Action::Inactive]
    );
}

#[test]
fn test_replay_across_clock_wrap() {
    let clock = SimClock::starting_at(u32::MAX - 100, 1);
    let mut replayer = replayer_for(&clock);
    let buffer: TimingBuffer = TimingBuffer::from_units(&[12, 5]);

    let report = replayer.replay_signal(&buffer).unwrap();
    let (emitter, _) = replayer.release();

    let spans = spans(&emitter);
    assert_close(spans[0], 12 * 37);
    assert_close(spans[2], 5 * 37);
    assert!(report.elapsed_us < 17 * 37 + 20);
}

#[test]
fn test_carrier_emitter_duty_sequence() {
    let clock = SimClock::new(1);
    let pwm = FakePwm::default();
    let writes = pwm.writes.clone();
    let mut replayer =
        EdgeReplayer::new(CarrierEmitter::new(pwm), clock.clone(), &IrConfig::DEFAULT).unwrap();
    let buffer: TimingBuffer = TimingBuffer::from_units(&[2, 2, 2]);

    replayer.replay_signal(&buffer).unwrap();

    // 1023 * 1 / 2 = 511
    assert_eq!(*writes.borrow(), vec![511, 0, 0, 511, 0, 0]);
}

#[test]
fn test_unusable_config_rejected() {
    let clock = SimClock::new(1);
    let zero_scale = IrConfig::DEFAULT.with_scale(0);
    let result = EdgeReplayer::new(RecordingEmitter::new(&clock), clock.clone(), &zero_scale);
    assert_eq!(result.err(), Some(ConfigError::InvalidScale));

    let bad_duty = IrConfig::DEFAULT.with_carrier_duty(1, 0);
    let result = EdgeReplayer::new(RecordingEmitter::new(&clock), clock.clone(), &bad_duty);
    assert_eq!(result.err(), Some(ConfigError::InvalidDuty));

    assert_eq!(
        CarrierEmitter::with_duty(FakePwm::default(), 1, 0).err(),
        Some(ConfigError::InvalidDuty)
    );
}

#[test]
fn test_capture_then_replay_within_one_unit() {
    let sent = [462u32, 203, 1128, 92, 277];

    let capture_clock = SimClock::new(1);
    let segments = receiver_waveform(300, &sent);
    let pin = WaveformPin::new(&capture_clock, &segments, PinState::High);
    let mut capturer =
        EdgeCapturer::new(PollingSensor::new(pin, capture_clock), IrConfig::DEFAULT).unwrap();
    let mut buffer: TimingBuffer = TimingBuffer::new();
    capturer.record_signal(&mut buffer).unwrap();

    let replay_clock = SimClock::new(1);
    let mut replayer = EdgeReplayer::new(
        RecordingEmitter::new(&replay_clock),
        replay_clock.clone(),
        &IrConfig::DEFAULT,
    ).unwrap();
    replayer.replay_signal(&buffer).unwrap();
    let (emitter, _) = replayer.release();

    // Burst spans are On->Off, gap spans are Inactive->next command.
    let spans = spans(&emitter);
    let replayed = [spans[0], spans[2], spans[3], spans[5], spans[6]];
    for (want, got) in sent.iter().zip(replayed.iter()) {
        assert!(
            *got + 37 > *want && *got <= *want + 3,
            "replayed {} for sent {}",
            got,
            want
        );
    }
}
