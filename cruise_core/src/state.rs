//! Per-session control state and per-tick inputs.

use crate::accel::AccelState;
use crate::chime::ChimeState;
use crate::config::CruiseParams;
use crate::icon::FollowDistance;
use crate::set_speed::SetSpeedState;

/// Everything the cruise loop carries from one tick to the next.
///
/// Each component owns its slice; the controller hands the slice in and
/// stores whatever comes back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlState {
    pub set_speed: SetSpeedState,
    pub follow: FollowDistance,
    pub accel: AccelState,
    pub chime: ChimeState,
}

impl ControlState {
    /// Session-start state for the given parameters.
    pub fn new(params: &CruiseParams) -> Self {
        Self {
            follow: FollowDistance::new(params.follow.initial),
            ..Self::default()
        }
    }

    pub fn short_press(&self) -> bool {
        self.set_speed.short_press()
    }

    pub fn timer(&self) -> u32 {
        self.set_speed.timer()
    }

    /// Resume speed (m/s).
    pub fn ressetspeed(&self) -> f32 {
        self.set_speed.ressetspeed()
    }

    pub fn gas_set(&self) -> bool {
        self.set_speed.gas_set
    }

    pub fn gas_timer(&self) -> u32 {
        self.set_speed.gas_timer
    }

    pub fn follow_set(&self) -> u8 {
        self.follow.set
    }

    pub fn follow_set_prev(&self) -> u8 {
        self.follow.prev
    }

    pub fn accel_steady(&self) -> f32 {
        self.accel.steady
    }

    pub fn accel_lim_prev(&self) -> f32 {
        self.accel.lim_prev
    }

    pub fn chime_val(&self) -> u8 {
        self.chime.chime_val
    }

    pub fn chime_timer(&self) -> u32 {
        self.chime.chime_timer
    }

    pub fn gap_timer(&self) -> u32 {
        self.chime.gap_timer
    }
}

/// Fresh inputs for one tick. Speeds in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInputs {
    /// Target fed back from the previous tick (or from the planner).
    pub set_speed: f32,
    pub acc_enabled: bool,
    pub acc_enabled_prev: bool,
    pub setplus: bool,
    pub setminus: bool,
    pub resbut: bool,
    pub vego: f32,
    pub gas: bool,
    pub has_lead: bool,
    pub dist_dec: bool,
    pub dist_inc: bool,
    pub acc_available: bool,
    pub mute: bool,
}
