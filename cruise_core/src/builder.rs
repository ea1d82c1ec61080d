//! Builder for `CruiseController`.
//!
//! Parameters default to the stock constants; `build()` rejects ranges the
//! shaping components cannot work with. A smoothing factor outside `[0, 1]`
//! is accepted: the accel command then holds its previous value, and a
//! warning is logged once at construction.

use crate::config::{
    AccelCfg, ChimeCfg, CruiseParams, FOLLOW_MAX, FOLLOW_MIN, FollowCfg, SetSpeedCfg,
};
use crate::controller::CruiseController;
use crate::error::{BuildError, Result};

impl CruiseController {
    /// Start building a controller with stock parameters.
    pub fn builder() -> CruiseControllerBuilder {
        CruiseControllerBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CruiseControllerBuilder {
    params: CruiseParams,
}

impl CruiseControllerBuilder {
    /// Replace every parameter at once.
    pub fn with_params(mut self, params: CruiseParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_set_speed(mut self, cfg: SetSpeedCfg) -> Self {
        self.params.set_speed = cfg;
        self
    }

    pub fn with_accel(mut self, cfg: AccelCfg) -> Self {
        self.params.accel = cfg;
        self
    }

    pub fn with_chime(mut self, cfg: ChimeCfg) -> Self {
        self.params.chime = cfg;
        self
    }

    pub fn with_follow(mut self, cfg: FollowCfg) -> Self {
        self.params.follow = cfg;
        self
    }

    pub fn with_tick_rate_hz(mut self, hz: u32) -> Self {
        self.params.tick_rate_hz = hz;
        self
    }

    pub fn build(self) -> Result<CruiseController> {
        validate(&self.params)?;
        Ok(CruiseController::from_params(self.params))
    }
}

fn invalid(msg: &'static str) -> eyre::Report {
    eyre::Report::new(BuildError::InvalidConfig(msg))
}

fn validate(p: &CruiseParams) -> Result<()> {
    // ── Set speed ────────────────────────────────────────────────────────────
    let s = &p.set_speed;
    if !s.min_mph.is_finite() || !s.max_mph.is_finite() {
        return Err(invalid("set speed bounds must be finite"));
    }
    if s.min_mph <= 0.0 {
        return Err(invalid("min set speed must be > 0"));
    }
    if s.max_mph < s.min_mph {
        return Err(invalid("max set speed must be >= min set speed"));
    }
    if s.long_press_ticks == 0 {
        return Err(invalid("long_press_ticks must be >= 1"));
    }
    if s.short_step_mph < 1 || s.long_step_mph < 1 {
        return Err(invalid("press steps must be >= 1 mph"));
    }

    // ── Accel ────────────────────────────────────────────────────────────────
    let a = &p.accel;
    if !a.min.is_finite() || !a.max.is_finite() {
        return Err(invalid("accel limits must be finite"));
    }
    if a.min > a.max {
        return Err(invalid("accel min must be <= accel max"));
    }
    if !a.hyst_gap.is_finite() || a.hyst_gap.is_sign_negative() {
        return Err(invalid("hysteresis gap must be finite and >= 0"));
    }

    // ── Chime / follow / rate ────────────────────────────────────────────────
    if p.chime.chime_ticks == 0 {
        return Err(invalid("chime_ticks must be >= 1"));
    }
    if !(FOLLOW_MIN..=FOLLOW_MAX).contains(&p.follow.initial) {
        return Err(invalid("initial follow distance must be in [1, 4]"));
    }
    if p.tick_rate_hz == 0 {
        return Err(invalid("tick_rate_hz must be > 0"));
    }
    Ok(())
}
