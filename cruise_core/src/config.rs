//! Runtime parameters for the cruise shaping components.
//!
//! These are immutable once a controller is built and are injected into each
//! component at construction. They are separate from the TOML-deserialized
//! config in `cruise_config`; see `conversions` for the mapping.

use crate::units::mph_to_ms;

/// Lowest selectable target speed (mph).
pub const SET_SPEED_MIN_MPH: f32 = 5.0;
/// Highest selectable target speed (mph).
pub const SET_SPEED_MAX_MPH: f32 = 120.0;
/// Lowest selectable target speed (m/s).
pub const SET_SPEED_MIN: f32 = SET_SPEED_MIN_MPH * crate::units::MPH_TO_MS;
/// Highest selectable target speed (m/s).
pub const SET_SPEED_MAX: f32 = SET_SPEED_MAX_MPH * crate::units::MPH_TO_MS;
/// Ticks between long-press snaps (500 ms at 100 Hz).
pub const LONG_PRESS_TIME: u32 = 50;
pub const SHORT_PRESS_STEP: i32 = 1;
pub const LONG_PRESS_STEP: i32 = 5;
/// Gas-override latch may be cleared by decrease after this many held ticks.
pub const GAS_RELEASE_TICKS: u32 = 200;

/// Don't change the accel command for oscillations within this value (m/s^2).
pub const ACCEL_HYST_GAP: f32 = 0.0;
pub const ACCEL_MAX: f32 = 2.0;
pub const ACCEL_MIN: f32 = -3.8;
pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.4;

pub const CHIME_TIME: u32 = 8;
pub const CHIME_GAP_TIME: u32 = 5;

pub const FOLLOW_MIN: u8 = 1;
pub const FOLLOW_MAX: u8 = 4;

pub const DEFAULT_TICK_RATE_HZ: u32 = 100;

/// Set-speed button handling.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSpeedCfg {
    pub min_mph: f32,
    pub max_mph: f32,
    pub long_press_ticks: u32,
    pub short_step_mph: i32,
    pub long_step_mph: i32,
    pub gas_release_ticks: u32,
}

impl SetSpeedCfg {
    #[inline]
    pub fn min_ms(&self) -> f32 {
        mph_to_ms(self.min_mph)
    }

    #[inline]
    pub fn max_ms(&self) -> f32 {
        mph_to_ms(self.max_mph)
    }
}

impl Default for SetSpeedCfg {
    fn default() -> Self {
        Self {
            min_mph: SET_SPEED_MIN_MPH,
            max_mph: SET_SPEED_MAX_MPH,
            long_press_ticks: LONG_PRESS_TIME,
            short_step_mph: SHORT_PRESS_STEP,
            long_step_mph: LONG_PRESS_STEP,
            gas_release_ticks: GAS_RELEASE_TICKS,
        }
    }
}

/// Acceleration command shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelCfg {
    pub hyst_gap: f32,
    pub min: f32,
    pub max: f32,
    /// Low-pass factor. Values outside [0.0, 1.0] make the rate limiter hold
    /// its previous output.
    pub smoothing_factor: f32,
}

impl Default for AccelCfg {
    fn default() -> Self {
        Self {
            hyst_gap: ACCEL_HYST_GAP,
            min: ACCEL_MIN,
            max: ACCEL_MAX,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
        }
    }
}

/// Cluster chime timing, in ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChimeCfg {
    pub chime_ticks: u32,
    pub gap_ticks: u32,
}

impl Default for ChimeCfg {
    fn default() -> Self {
        Self {
            chime_ticks: CHIME_TIME,
            gap_ticks: CHIME_GAP_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowCfg {
    /// Bars shown at session start.
    pub initial: u8,
}

impl Default for FollowCfg {
    fn default() -> Self {
        Self { initial: 3 }
    }
}

/// Everything a `CruiseController` needs, fixed for the life of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CruiseParams {
    pub set_speed: SetSpeedCfg,
    pub accel: AccelCfg,
    pub chime: ChimeCfg,
    pub follow: FollowCfg,
    /// Control loop rate; only used for pacing replays.
    pub tick_rate_hz: u32,
}

impl Default for CruiseParams {
    fn default() -> Self {
        Self {
            set_speed: SetSpeedCfg::default(),
            accel: AccelCfg::default(),
            chime: ChimeCfg::default(),
            follow: FollowCfg::default(),
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
        }
    }
}
