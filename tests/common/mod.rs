//! Simulated hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, InputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};
use rust_ir_remote::{Clock, EdgeResult, EdgeSource, IrEmitter, StartResult};

/// Clock that advances by `step` µs every time it is read.
#[derive(Clone)]
pub struct SimClock {
    now: Rc<Cell<u32>>,
    step: u32,
}

impl SimClock {
    pub fn new(step: u32) -> Self {
        Self::starting_at(0, step)
    }

    pub fn starting_at(t0: u32, step: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(t0)),
            step,
        }
    }

    /// Current time without advancing.
    pub fn peek(&self) -> u32 {
        self.now.get()
    }

    fn tick(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(self.step));
        t
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.tick() / 1000
    }

    fn now_us(&self) -> u32 {
        self.tick()
    }
}

/// Input whose level follows a list of `(level, duration_us)` segments
/// starting at `t0`, then holds `tail` forever.
pub struct WaveformPin {
    clock: SimClock,
    t0: u32,
    segments: Vec<(PinState, u32)>,
    tail: PinState,
}

impl WaveformPin {
    pub fn new(clock: &SimClock, segments: &[(PinState, u32)], tail: PinState) -> Self {
        Self {
            clock: clock.clone(),
            t0: clock.peek(),
            segments: segments.to_vec(),
            tail,
        }
    }

    fn level_at(&self, t: u32) -> PinState {
        let mut offset = t.wrapping_sub(self.t0);
        for &(level, len) in &self.segments {
            if offset < len {
                return level;
            }
            offset -= len;
        }
        self.tail
    }
}

impl digital::ErrorType for WaveformPin {
    type Error = Infallible;
}

impl InputPin for WaveformPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level_at(self.clock.peek()) == PinState::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level_at(self.clock.peek()) == PinState::Low)
    }
}

/// IR burst/gap waveform as a TSOP receiver would output it
/// (active low), starting after `idle_us` of idle.
pub fn receiver_waveform(idle_us: u32, durations_us: &[u32]) -> Vec<(PinState, u32)> {
    let mut segments = vec![(PinState::High, idle_us)];
    let mut level = PinState::Low;
    for &d in durations_us {
        segments.push((level, d));
        level = !level;
    }
    segments
}

/// Input that always fails.
pub struct BrokenPin;

#[derive(Debug, PartialEq, Eq)]
pub struct PinFault;

impl digital::Error for PinFault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl digital::ErrorType for BrokenPin {
    type Error = PinFault;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(PinFault)
    }
}

/// Edge source that replays a fixed script instead of polling.
pub struct ScriptedSource {
    pub start: StartResult,
    pub edges: VecDeque<EdgeResult>,
    pub expected_levels: Vec<PinState>,
    pub start_calls: u32,
}

impl ScriptedSource {
    pub fn new(start: StartResult, edges: &[EdgeResult]) -> Self {
        Self {
            start,
            edges: edges.iter().copied().collect(),
            expected_levels: Vec::new(),
            start_calls: 0,
        }
    }

    /// Edges of the given durations, then silence.
    pub fn signal(durations_us: &[u32]) -> Self {
        let edges: Vec<EdgeResult> = durations_us
            .iter()
            .map(|&elapsed_us| EdgeResult::Edge { elapsed_us })
            .collect();
        Self::new(StartResult::Detected, &edges)
    }

    pub fn edge_calls(&self) -> usize {
        self.expected_levels.len()
    }
}

impl EdgeSource for ScriptedSource {
    type Error = Infallible;

    fn wait_for_start(&mut self, _level: PinState, _timeout_ms: u32) -> Result<StartResult, Self::Error> {
        self.start_calls += 1;
        Ok(self.start)
    }

    fn wait_for_edge(&mut self, level: PinState, _timeout_us: u32) -> Result<EdgeResult, Self::Error> {
        self.expected_levels.push(level);
        Ok(self.edges.pop_front().unwrap_or(EdgeResult::Timeout))
    }

    fn now_us(&self) -> u32 {
        0
    }
}

/// Emitter command, as seen by the LED driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CarrierOn,
    CarrierOff,
    Inactive,
}

/// Emitter that timestamps every command against a `SimClock`.
pub struct RecordingEmitter {
    clock: SimClock,
    pub log: Vec<(Action, u32)>,
    /// Fail `start_carrier` on this call number (0-based).
    pub fail_carrier_on: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EmitFault;

impl RecordingEmitter {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            log: Vec::new(),
            fail_carrier_on: None,
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.log.iter().map(|&(a, _)| a).collect()
    }

    pub fn count(&self, action: Action) -> usize {
        self.log.iter().filter(|&&(a, _)| a == action).count()
    }

    fn record(&mut self, action: Action) {
        self.log.push((action, self.clock.peek()));
    }
}

impl IrEmitter for RecordingEmitter {
    type Error = EmitFault;

    fn start_carrier(&mut self) -> Result<(), Self::Error> {
        if self.fail_carrier_on == Some(self.count(Action::CarrierOn)) {
            return Err(EmitFault);
        }
        self.record(Action::CarrierOn);
        Ok(())
    }

    fn stop_carrier(&mut self) -> Result<(), Self::Error> {
        self.record(Action::CarrierOff);
        Ok(())
    }

    fn set_inactive(&mut self) -> Result<(), Self::Error> {
        self.record(Action::Inactive);
        Ok(())
    }
}

/// PWM channel that keeps every duty value written to it.
#[derive(Clone, Default)]
pub struct FakePwm {
    pub writes: Rc<RefCell<Vec<u16>>>,
}

impl pwm::ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        1023
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.writes.borrow_mut().push(duty);
        Ok(())
    }
}
