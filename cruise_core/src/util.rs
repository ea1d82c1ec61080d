//! Tick period helpers for cruise_core.

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// Compute the tick period in microseconds for a given loop rate in Hz.
/// - Clamps `hz` to at least 1 to avoid division by zero.
/// - Ensures result is at least 1 microsecond.
#[inline]
pub fn period_us(hz: u32) -> u64 {
    (MICROS_PER_SEC / u64::from(hz.max(1))).max(1)
}

/// Convert a tick count at `hz` into milliseconds of control time.
#[inline]
pub fn ticks_to_ms(ticks: u64, hz: u32) -> u64 {
    ticks.saturating_mul(1_000) / u64::from(hz.max(1))
}
