//! Module: timing
//!
//! Purpose: Fixed-capacity buffer of quantized edge durations shared by the
//! capturer (writer) and the replayer (reader).
//!
//! Architecture:
//! - Stack array plus explicit length, no allocation
//! - Durations stored as `u8` units of `scale` microseconds
//! - Only the first `len()` entries are ever exposed
//!
//! Safety: Safe. No unsafe blocks.

use crate::config::MAX_EDGES;

/// Convert a duration in microseconds to stored units.
///
/// Truncates (integer division) and saturates at `u8::MAX`.
/// `scale` must be non-zero; `IrConfig::validate` guarantees it for the
/// capturer and replayer.
#[inline]
pub fn quantize(duration_us: u32, scale: u32) -> u8 {
    (duration_us / scale).min(u8::MAX as u32) as u8
}

/// Convert stored units back to microseconds.
#[inline]
pub fn dequantize(units: u8, scale: u32) -> u32 {
    units as u32 * scale
}

/// Ordered, capacity-bounded sequence of quantized durations.
///
/// Entry 0 is the first active burst, entry 1 the following gap, and so on.
#[derive(Clone, Debug)]
pub struct TimingBuffer<const N: usize = MAX_EDGES> {
    units: [u8; N],
    len: usize,
}

impl<const N: usize> TimingBuffer<N> {
    /// Create an empty buffer (edge count 0).
    pub const fn new() -> Self {
        Self {
            units: [0u8; N],
            len: 0,
        }
    }

    /// Build a buffer from already-quantized units.
    ///
    /// Units beyond capacity are dropped.
    pub fn from_units(units: &[u8]) -> Self {
        let mut buf = Self::new();
        for &u in units {
            if !buf.push(u) {
                break;
            }
        }
        buf
    }

    /// Number of valid entries (the edge count).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Append one entry. Returns `false` if the buffer is full.
    #[inline]
    pub fn push(&mut self, units: u8) -> bool {
        if self.len == N {
            return false;
        }
        self.units[self.len] = units;
        self.len += 1;
        true
    }

    /// Mark all entries invalid. Storage is not zeroed.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Valid entry at `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<u8> {
        self.as_slice().get(idx).copied()
    }

    /// Valid entries as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.units[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, u8>> {
        self.as_slice().iter().copied()
    }

    /// Valid entries converted back to microseconds.
    pub fn durations_us(&self, scale: u32) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(move |u| dequantize(u, scale))
    }
}

impl<const N: usize> Default for TimingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for TimingBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for TimingBuffer<N> {}
