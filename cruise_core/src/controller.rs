//! The per-tick cruise loop tying the four shaping components together.

use crate::accel::AccelShaper;
use crate::chime::{ChimeController, ChimeInputs};
use crate::config::CruiseParams;
use crate::icon::{CruiseIconSelector, IconInputs};
use crate::set_speed::{SetSpeedController, SetSpeedInputs};
use crate::state::{ControlState, TickInputs};
use crate::status::TickOutputs;

/// Owns the session state and runs each component once per tick.
///
/// Components never call each other; they only share the tick inputs.
#[derive(Debug, Clone)]
pub struct CruiseController {
    params: CruiseParams,
    set_speed: SetSpeedController,
    icon: CruiseIconSelector,
    accel: AccelShaper,
    chime: ChimeController,
    state: ControlState,
    ticks: u64,
}

impl CruiseController {
    pub(crate) fn from_params(params: CruiseParams) -> Self {
        Self {
            set_speed: SetSpeedController::new(params.set_speed.clone()),
            icon: CruiseIconSelector,
            accel: AccelShaper::new(params.accel.clone()),
            chime: ChimeController::new(params.chime.clone()),
            state: ControlState::new(&params),
            ticks: 0,
            params,
        }
    }

    pub fn params(&self) -> &CruiseParams {
        &self.params
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Ticks processed since construction or the last `reset`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Restore session-start state. Parameters are kept.
    pub fn reset(&mut self) {
        self.state = ControlState::new(&self.params);
        self.ticks = 0;
        tracing::debug!("cruise state reset");
    }

    /// Run one tick. `accel_request` is the raw planner acceleration (m/s^2).
    pub fn step(&mut self, input: &TickInputs, accel_request: f32) -> TickOutputs {
        if !input.acc_enabled_prev && input.acc_enabled {
            tracing::debug!(tick = self.ticks, resume = input.resbut, "cruise engaged");
        } else if input.acc_enabled_prev && !input.acc_enabled {
            tracing::debug!(tick = self.ticks, mute = input.mute, "cruise disengaged");
        }

        let (ss_state, set_speed) = self.set_speed.step(
            self.state.set_speed,
            &SetSpeedInputs {
                set_speed: input.set_speed,
                acc_enabled: input.acc_enabled,
                acc_enabled_prev: input.acc_enabled_prev,
                setplus: input.setplus,
                setminus: input.setminus,
                resbut: input.resbut,
                vego: input.vego,
                gas: input.gas,
            },
        );

        let (follow, icon) = self.icon.step(
            self.state.follow,
            &IconInputs {
                acc_enabled: input.acc_enabled,
                acc_available: input.acc_available,
                has_lead: input.has_lead,
                dist_dec: input.dist_dec,
                dist_inc: input.dist_inc,
            },
        );

        let (accel_state, accel_cmd) = self.accel.step(self.state.accel, accel_request);

        let (chime_state, chime_active) = self.chime.step(
            self.state.chime,
            &ChimeInputs {
                enabled: input.acc_enabled,
                enabled_prev: input.acc_enabled_prev,
                mute: input.mute,
            },
        );

        self.state = ControlState {
            set_speed: ss_state,
            follow,
            accel: accel_state,
            chime: chime_state,
        };
        self.ticks = self.ticks.saturating_add(1);

        let out = TickOutputs {
            set_speed,
            cruise_state: icon.cruise_state,
            cruise_icon: icon.cruise_icon,
            follow_set: follow.set,
            accel_cmd,
            chime_val: chime_state.chime_val,
            chime_active,
        };
        tracing::trace!(?out, "tick");
        out
    }
}
