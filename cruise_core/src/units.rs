//! Speed conversion and clamping helpers.
//!
//! The set-speed state machine works in whole display miles per hour while
//! the rest of the stack speaks meters per second; everything crossing that
//! boundary goes through here.

/// Exact by definition of the international mile.
pub const MPH_TO_MS: f32 = 0.447_04;
pub const MS_TO_MPH: f32 = 1.0 / MPH_TO_MS;

#[inline]
pub fn mph_to_ms(mph: f32) -> f32 {
    mph * MPH_TO_MS
}

#[inline]
pub fn ms_to_mph(ms: f32) -> f32 {
    ms * MS_TO_MPH
}

/// Round a speed in m/s to whole mph, nearest with ties to even.
/// Saturates at the `i32` range (infinities included); NaN maps to 0.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn ms_to_whole_mph(ms: f32) -> i32 {
    let mph = ms_to_mph(ms);
    if mph.is_nan() {
        return 0;
    }
    // `as` saturates, so out-of-range and infinite values land on the bounds.
    mph.round_ties_even() as i32
}

/// Whole mph back to m/s.
#[inline]
#[allow(clippy::cast_precision_loss)]
pub fn whole_mph_to_ms(mph: i32) -> f32 {
    mph_to_ms(mph as f32)
}

/// Clip `x` into `[lo, hi]`. NaN maps to `lo` so a corrupt input can never
/// escape the band.
#[inline]
pub fn clip(x: f32, lo: f32, hi: f32) -> f32 {
    if x.is_nan() || x <= lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}
