//! Acceleration command shaping: dead-band hysteresis and a first-order
//! low-pass "rate limiter".

use crate::config::{ACCEL_HYST_GAP, AccelCfg, DEFAULT_SMOOTHING_FACTOR};
use crate::units::clip;

/// Dead-band filter around the last accepted value.
///
/// Returns `(accel_out, accel_steady')`. The output is always the (possibly
/// moved) center.
#[inline]
pub fn hysteresis(accel: f32, accel_steady: f32, gap: f32) -> (f32, f32) {
    let mut steady = accel_steady;
    if accel > steady + gap {
        steady = accel - gap;
    } else if accel < steady - gap {
        steady = accel + gap;
    }
    (steady, steady)
}

/// [`hysteresis`] with the stock gap.
#[inline]
pub fn accel_hysteresis(accel: f32, accel_steady: f32) -> (f32, f32) {
    hysteresis(accel, accel_steady, ACCEL_HYST_GAP)
}

/// Exponential smoothing: `factor * accel_lim + (1 - factor) * accel_lim_prev`.
///
/// A factor outside `[0, 1]` (or NaN) is not an error: the filter holds and
/// returns `accel_lim_prev` unchanged. Callers further up rely on this layer
/// degrading instead of failing.
#[inline]
pub fn accel_rate_limit(accel_lim: f32, accel_lim_prev: f32, smoothing_factor: f32) -> f32 {
    if !(0.0..=1.0).contains(&smoothing_factor) {
        return accel_lim_prev;
    }
    // Same blend written around prev so equal inputs are an exact fixed point.
    accel_lim_prev + smoothing_factor * (accel_lim - accel_lim_prev)
}

/// [`accel_rate_limit`] with the stock factor.
#[inline]
pub fn accel_rate_limit_default(accel_lim: f32, accel_lim_prev: f32) -> f32 {
    accel_rate_limit(accel_lim, accel_lim_prev, DEFAULT_SMOOTHING_FACTOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccelState {
    /// Hysteresis center.
    pub steady: f32,
    /// Last smoothed command.
    pub lim_prev: f32,
}

/// Hysteresis, clamp to the actuator envelope, then smoothing.
#[derive(Debug, Clone, Default)]
pub struct AccelShaper {
    cfg: AccelCfg,
}

impl AccelShaper {
    pub fn new(cfg: AccelCfg) -> Self {
        if !(0.0..=1.0).contains(&cfg.smoothing_factor) {
            tracing::warn!(
                smoothing_factor = cfg.smoothing_factor,
                "smoothing factor outside [0, 1]; accel command will hold its previous value"
            );
        }
        Self { cfg }
    }

    pub fn cfg(&self) -> &AccelCfg {
        &self.cfg
    }

    pub fn step(&self, state: AccelState, accel_request: f32) -> (AccelState, f32) {
        let (held, steady) = hysteresis(accel_request, state.steady, self.cfg.hyst_gap);
        let limited = clip(held, self.cfg.min, self.cfg.max);
        let smoothed = accel_rate_limit(limited, state.lim_prev, self.cfg.smoothing_factor);
        (
            AccelState {
                steady,
                lim_prev: smoothed,
            },
            smoothed,
        )
    }
}
