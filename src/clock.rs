//! Monotonic time source for the busy-wait loops.
//!
//! Both clocks wrap around at `u32::MAX`. Elapsed time is always computed
//! with `wrapping_sub`, so a wrap between start and now is harmless as long
//! as the measured interval is shorter than the wrap period.

/// Free-running millisecond and microsecond counters.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch (wrapping).
    fn now_ms(&self) -> u32;

    /// Microseconds since an arbitrary epoch (wrapping).
    fn now_us(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }

    #[inline]
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

/// Wrap-safe difference `now - start`.
#[inline]
pub fn elapsed(start: u32, now: u32) -> u32 {
    now.wrapping_sub(start)
}

/// Spin until more than `duration_us` has passed since `start_us`.
///
/// Returns the elapsed time observed on the final poll.
#[inline]
pub fn spin_until<C: Clock + ?Sized>(clock: &C, start_us: u32, duration_us: u32) -> u32 {
    loop {
        let waited = elapsed(start_us, clock.now_us());
        if waited > duration_us {
            return waited;
        }
        core::hint::spin_loop();
    }
}

/// ESP-IDF high resolution timer (`esp_timer_get_time`).
#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EspClock;

#[cfg(target_os = "espidf")]
impl Clock for EspClock {
    #[inline]
    fn now_ms(&self) -> u32 {
        // SAFETY: esp_timer_get_time is always safe to call after boot
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        (us / 1000) as u32
    }

    #[inline]
    fn now_us(&self) -> u32 {
        // SAFETY: esp_timer_get_time is always safe to call after boot
        unsafe { esp_idf_svc::sys::esp_timer_get_time() as u32 }
    }
}
