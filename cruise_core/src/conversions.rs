//! `From` implementations bridging `cruise_config` types to `cruise_core` types.

use crate::config::{AccelCfg, ChimeCfg, CruiseParams, FollowCfg, SetSpeedCfg};
use crate::runner::ScriptTick;
use crate::state::TickInputs;
use crate::units::mph_to_ms;

// ── SetSpeedCfg ──────────────────────────────────────────────────────────────

impl From<&cruise_config::SetSpeedCfg> for SetSpeedCfg {
    fn from(c: &cruise_config::SetSpeedCfg) -> Self {
        Self {
            min_mph: c.min_mph,
            max_mph: c.max_mph,
            long_press_ticks: c.long_press_ticks,
            short_step_mph: c.short_step_mph,
            long_step_mph: c.long_step_mph,
            gas_release_ticks: c.gas_release_ticks,
        }
    }
}

// ── AccelCfg ─────────────────────────────────────────────────────────────────

impl From<&cruise_config::AccelCfg> for AccelCfg {
    fn from(c: &cruise_config::AccelCfg) -> Self {
        Self {
            hyst_gap: c.hyst_gap,
            min: c.min,
            max: c.max,
            smoothing_factor: c.smoothing_factor,
        }
    }
}

// ── ChimeCfg / FollowCfg ─────────────────────────────────────────────────────

impl From<&cruise_config::ChimeCfg> for ChimeCfg {
    fn from(c: &cruise_config::ChimeCfg) -> Self {
        Self {
            chime_ticks: c.chime_ticks,
            gap_ticks: c.gap_ticks,
        }
    }
}

impl From<&cruise_config::FollowCfg> for FollowCfg {
    fn from(c: &cruise_config::FollowCfg) -> Self {
        Self { initial: c.initial }
    }
}

// ── CruiseParams ─────────────────────────────────────────────────────────────

impl From<&cruise_config::Config> for CruiseParams {
    fn from(c: &cruise_config::Config) -> Self {
        Self {
            set_speed: (&c.set_speed).into(),
            accel: (&c.accel).into(),
            chime: (&c.chime).into(),
            follow: (&c.follow).into(),
            tick_rate_hz: c.runner.tick_rate_hz,
        }
    }
}

// ── Tick script rows ─────────────────────────────────────────────────────────

impl From<&cruise_config::TickRow> for ScriptTick {
    fn from(r: &cruise_config::TickRow) -> Self {
        Self {
            inputs: TickInputs {
                set_speed: r.set_speed_mph.map_or(0.0, mph_to_ms),
                acc_enabled: r.acc_enabled,
                acc_enabled_prev: r.acc_enabled_prev.unwrap_or(false),
                setplus: r.setplus,
                setminus: r.setminus,
                resbut: r.resbut,
                vego: mph_to_ms(r.vego_mph),
                gas: r.gas,
                has_lead: r.has_lead,
                dist_dec: r.dist_dec,
                dist_inc: r.dist_inc,
                acc_available: r.acc_available,
                mute: r.mute,
            },
            accel_request: r.accel,
            explicit_set_speed: r.set_speed_mph.is_some(),
            explicit_enabled_prev: r.acc_enabled_prev.is_some(),
        }
    }
}
