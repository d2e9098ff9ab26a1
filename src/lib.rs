//! # RustIrRemote
//!
//! Raw infrared remote capture and replay.
//!
//! ## Architecture
//!
//! ```text
//!  IR receiver ──▶ PollingSensor ──▶ EdgeCapturer ──▶ TimingBuffer
//!                                                          │
//!  IR LED ◀────── CarrierEmitter ◀── EdgeReplayer ◀────────┘
//! ```
//!
//! - The capturer records edge durations, quantized to `u8` units
//! - The replayer re-emits them, carrier-modulated during bursts
//! - The buffer is owned by the caller and borrowed by one side at a time
//! - Hardware is reached only through `embedded-hal` traits and [`Clock`]
//!
//! No protocol decoding: a capture is replayed exactly as it was seen.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod timing;
pub mod clock;
pub mod sensor;
pub mod emitter;
pub mod capture;
pub mod replay;
pub mod logging;
pub mod log_drain;
mod log_globals;

pub use config::{IrConfig, IrPins, MAX_EDGES};
pub use error::{CaptureError, ReplayError, ConfigError};
pub use timing::{TimingBuffer, quantize, dequantize};
pub use clock::Clock;
pub use sensor::{EdgeSource, PollingSensor, EdgeResult, StartResult};
pub use emitter::{IrEmitter, CarrierEmitter};
pub use capture::{EdgeCapturer, CaptureOutcome};
pub use replay::{EdgeReplayer, ReplayReport};
pub use log_globals::IR_LOG_STREAM;
