//! Outputs of a single controller tick.

use crate::icon::CruiseState;

/// What the cruise loop publishes after each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutputs {
    /// Clipped target speed (m/s).
    pub set_speed: f32,
    pub cruise_state: CruiseState,
    pub cruise_icon: u8,
    pub follow_set: u8,
    /// Shaped acceleration command (m/s^2).
    pub accel_cmd: f32,
    pub chime_val: u8,
    /// The cluster tone is sounding during this tick.
    pub chime_active: bool,
}

impl TickOutputs {
    pub fn engaged(&self) -> bool {
        self.cruise_state == CruiseState::Engaged
    }
}
