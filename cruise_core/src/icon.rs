//! Cruise state / cluster icon selection and follow-distance adjustment.

use crate::config::{FOLLOW_MAX, FOLLOW_MIN};

/// Cruise state reported to the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CruiseState {
    /// ACC unavailable.
    Off,
    /// ACC on but not engaged.
    Ready,
    /// ACC engaged.
    Engaged,
}

impl CruiseState {
    /// Wire value of the cluster signal.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            CruiseState::Off => 0,
            CruiseState::Ready => 3,
            CruiseState::Engaged => 4,
        }
    }
}

/// Follow-distance setting with the last value acknowledged while no
/// distance button was held.
///
/// A button only moves the setting while `set == prev`, so holding a button
/// changes it once per press, and a change written by another component
/// (making `set != prev`) is left alone until the buttons are released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowDistance {
    pub set: u8,
    pub prev: u8,
}

impl FollowDistance {
    pub fn new(bars: u8) -> Self {
        let bars = bars.clamp(FOLLOW_MIN, FOLLOW_MAX);
        Self {
            set: bars,
            prev: bars,
        }
    }
}

impl Default for FollowDistance {
    fn default() -> Self {
        Self::new(3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconInputs {
    pub acc_enabled: bool,
    pub acc_available: bool,
    pub has_lead: bool,
    pub dist_dec: bool,
    pub dist_inc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconOutput {
    pub cruise_state: CruiseState,
    pub cruise_icon: u8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CruiseIconSelector;

impl CruiseIconSelector {
    pub fn step(&self, follow: FollowDistance, input: &IconInputs) -> (FollowDistance, IconOutput) {
        let mut next = follow;
        let mut bars = follow.set;
        if follow.set == follow.prev {
            if input.dist_dec {
                bars = bars.saturating_sub(1);
            }
            if input.dist_inc {
                bars = bars.saturating_add(1);
            }
        }
        // Clamp unconditionally: an out-of-range value written elsewhere must
        // not reach the cluster either.
        next.set = bars.clamp(FOLLOW_MIN, FOLLOW_MAX);
        if next.set != follow.set {
            tracing::debug!(from = follow.set, to = next.set, "follow distance changed");
        }
        if !(input.dist_dec || input.dist_inc) {
            next.prev = next.set;
        }

        let out = match (input.acc_enabled, input.has_lead, input.acc_available) {
            (true, true, _) => IconOutput {
                cruise_state: CruiseState::Engaged,
                cruise_icon: next.set + 11,
            },
            (true, false, _) => IconOutput {
                cruise_state: CruiseState::Engaged,
                cruise_icon: next.set + 7,
            },
            (false, _, true) => IconOutput {
                cruise_state: CruiseState::Ready,
                cruise_icon: next.set + 1,
            },
            (false, _, false) => IconOutput {
                cruise_state: CruiseState::Off,
                cruise_icon: 0,
            },
        };
        (next, out)
    }
}

/// Positional form of [`CruiseIconSelector::step`].
///
/// Returns `(cruise_state, cruise_icon, follow_set, follow_set_prev)`.
pub fn cruise_icon_logic(
    acc_enabled: bool,
    acc_available: bool,
    has_lead: bool,
    dist_dec: bool,
    dist_inc: bool,
    follow_set: u8,
    follow_set_prev: u8,
) -> (u8, u8, u8, u8) {
    let (next, out) = CruiseIconSelector.step(
        FollowDistance {
            set: follow_set,
            prev: follow_set_prev,
        },
        &IconInputs {
            acc_enabled,
            acc_available,
            has_lead,
            dist_dec,
            dist_inc,
        },
    );
    (out.cruise_state.code(), out.cruise_icon, next.set, next.prev)
}
