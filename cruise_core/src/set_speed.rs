//! Button-driven target-speed state machine.
//!
//! Works in whole display mph internally: every tick the incoming target and
//! ego speed are rounded to mph, the press logic runs on integers, and the
//! result is converted back to m/s and clipped to the configured band as the
//! very last step.
//!
//! Per tick, in order:
//! 1. an enabled→disabled edge captures the current target as the resume speed;
//! 2. gas-override bookkeeping (release on pedal up, or on decrease after a
//!    long override);
//! 3. the press state machine (first tick / long-press snap / release /
//!    resume edge / disabled);
//! 4. the output clip.

use crate::config::SetSpeedCfg;
use crate::units::{clip, ms_to_whole_mph, whole_mph_to_ms};

/// Where the driver is in a button press.
///
/// `Idle` carries no tick count: every path that releases a press also
/// zeroes the press timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressPhase {
    #[default]
    Idle,
    /// Held for fewer than `long_press_ticks` ticks.
    Short { ticks: u32 },
    /// Held long enough to snap to the long-press grid.
    Long { ticks: u32 },
}

impl PressPhase {
    /// Rebuild a phase from the legacy `(short_press, timer)` pair. A timer
    /// without `short_press` is dropped.
    pub fn from_parts(short_press: bool, timer: u32, long_press_ticks: u32) -> Self {
        if !short_press {
            PressPhase::Idle
        } else if timer >= long_press_ticks {
            PressPhase::Long { ticks: timer }
        } else {
            PressPhase::Short { ticks: timer }
        }
    }

    /// A press (or resume edge) has been consumed and is still held.
    #[inline]
    pub fn is_pressed(self) -> bool {
        !matches!(self, PressPhase::Idle)
    }

    #[inline]
    pub fn ticks(self) -> u32 {
        match self {
            PressPhase::Idle => 0,
            PressPhase::Short { ticks } | PressPhase::Long { ticks } => ticks,
        }
    }

    /// One more tick of holding.
    fn held(self, long_press_ticks: u32) -> Self {
        let ticks = self.ticks().saturating_add(1);
        if ticks >= long_press_ticks {
            PressPhase::Long { ticks }
        } else {
            PressPhase::Short { ticks }
        }
    }

    /// Whether this tick lands on a long-press snap boundary.
    fn on_snap_boundary(self, long_press_ticks: u32) -> bool {
        match self {
            PressPhase::Idle => false,
            PressPhase::Short { ticks } | PressPhase::Long { ticks } => {
                ticks % long_press_ticks.max(1) == 0
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// State owned by the set-speed controller across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetSpeedState {
    pub press: PressPhase,
    /// Target captured on the last disengage, in whole mph.
    pub resume_mph: i32,
    /// Gas override already applied during this pedal application.
    pub gas_set: bool,
    pub gas_timer: u32,
}

impl SetSpeedState {
    #[inline]
    pub fn short_press(&self) -> bool {
        self.press.is_pressed()
    }

    #[inline]
    pub fn timer(&self) -> u32 {
        self.press.ticks()
    }

    /// Resume speed in m/s.
    #[inline]
    pub fn ressetspeed(&self) -> f32 {
        whole_mph_to_ms(self.resume_mph)
    }
}

/// Inputs consumed by the set-speed controller each tick. Speeds in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SetSpeedInputs {
    pub set_speed: f32,
    pub acc_enabled: bool,
    pub acc_enabled_prev: bool,
    pub setplus: bool,
    pub setminus: bool,
    pub resbut: bool,
    pub vego: f32,
    pub gas: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SetSpeedController {
    cfg: SetSpeedCfg,
}

impl SetSpeedController {
    pub fn new(cfg: SetSpeedCfg) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &SetSpeedCfg {
        &self.cfg
    }

    /// Advance one tick. Returns the next state and the clipped target (m/s).
    pub fn step(&self, state: SetSpeedState, input: &SetSpeedInputs) -> (SetSpeedState, f32) {
        let cfg = &self.cfg;
        let mut next = state;
        let mut target = ms_to_whole_mph(input.set_speed);
        let vego = ms_to_whole_mph(input.vego);

        if input.acc_enabled_prev && !input.acc_enabled {
            next.resume_mph = target;
            tracing::debug!(resume_mph = target, "disengaged; resume speed captured");
        }

        if !input.gas || (next.gas_timer > cfg.gas_release_ticks && input.setminus) {
            if next.gas_set {
                tracing::debug!(gas_timer = next.gas_timer, "gas override released");
            }
            next.gas_set = false;
            next.gas_timer = 0;
        } else if next.gas_set {
            next.gas_timer = next.gas_timer.saturating_add(1);
        }

        if input.acc_enabled && input.acc_enabled_prev {
            let dir = if input.setplus {
                Some(Direction::Up)
            } else if input.setminus {
                Some(Direction::Down)
            } else {
                None
            };
            match dir {
                Some(dir) => {
                    if !next.press.is_pressed() {
                        target = self.first_press(dir, target, vego, input.gas, &mut next);
                    } else if next.press.on_snap_boundary(cfg.long_press_ticks) {
                        let snapped = self.snap(dir, target);
                        tracing::debug!(from_mph = target, to_mph = snapped, "long-press snap");
                        target = snapped;
                    }
                    next.press = next.press.held(cfg.long_press_ticks);
                }
                None => next.press = PressPhase::Idle,
            }
        } else if input.acc_enabled && !next.press.is_pressed() {
            target = if input.resbut { next.resume_mph } else { vego };
            tracing::debug!(target_mph = target, resume = input.resbut, "engaged");
            next.press = next.press.held(cfg.long_press_ticks);
        } else {
            next.press = PressPhase::Idle;
        }

        let out = clip(whole_mph_to_ms(target), cfg.min_ms(), cfg.max_ms());
        tracing::trace!(target_mph = target, set_speed = out, press = ?next.press, "set speed");
        (next, out)
    }

    /// First tick of a press: one short step, or the gas-override snap to the
    /// current speed when the pedal is down and no override is latched yet.
    fn first_press(
        &self,
        dir: Direction,
        target: i32,
        vego: i32,
        gas: bool,
        state: &mut SetSpeedState,
    ) -> i32 {
        let step = self.cfg.short_step_mph;
        let override_now = gas && !state.gas_set;
        if override_now {
            state.gas_set = true;
            tracing::debug!(vego_mph = vego, "gas override latched");
        }
        match (dir, override_now) {
            (Direction::Up, true) if target < vego => vego,
            (Direction::Up, _) => target.saturating_add(step),
            (Direction::Down, true) => vego,
            (Direction::Down, false) => target.saturating_sub(step),
        }
    }

    /// Long-press snap. Up moves to the next grid line; down first rounds up
    /// to the grid when unaligned, then steps one grid line down.
    fn snap(&self, dir: Direction, target: i32) -> i32 {
        let grid = self.cfg.long_step_mph.max(1);
        let rem = target.rem_euclid(grid);
        match dir {
            Direction::Up => target.saturating_add(grid - rem),
            Direction::Down => {
                let aligned = if rem > 0 {
                    target.saturating_add(grid - rem)
                } else {
                    target
                };
                aligned.saturating_sub(grid)
            }
        }
    }
}

/// Positional form of [`SetSpeedController::step`] with the stock parameters.
///
/// Returns `(set_speed, short_press, timer, gas_set, ressetspeed, gas_timer)`;
/// speeds are in m/s.
///
/// The `(short_press, timer)` pair is read through [`PressPhase::from_parts`]:
/// a nonzero `timer` with `short_press == false` is treated as idle, so the
/// count restarts at 1 on the next press. The controller itself never
/// produces that pair.
#[allow(clippy::too_many_arguments)]
pub fn set_speed_logic(
    set_speed: f32,
    acc_enabled: bool,
    acc_enabled_prev: bool,
    setplus: bool,
    setminus: bool,
    resbut: bool,
    timer: u32,
    ressetspeed: f32,
    short_press: bool,
    vego: f32,
    gas_set: bool,
    gas: bool,
    gas_timer: u32,
) -> (f32, bool, u32, bool, f32, u32) {
    let ctl = SetSpeedController::default();
    let state = SetSpeedState {
        press: PressPhase::from_parts(short_press, timer, ctl.cfg.long_press_ticks),
        resume_mph: ms_to_whole_mph(ressetspeed),
        gas_set,
        gas_timer,
    };
    let input = SetSpeedInputs {
        set_speed,
        acc_enabled,
        acc_enabled_prev,
        setplus,
        setminus,
        resbut,
        vego,
        gas,
    };
    let (next, out) = ctl.step(state, &input);
    (
        out,
        next.short_press(),
        next.timer(),
        next.gas_set,
        next.ressetspeed(),
        next.gas_timer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_up_reaches_next_multiple() {
        let c = SetSpeedController::default();
        assert_eq!(c.snap(Direction::Up, 66), 70);
        assert_eq!(c.snap(Direction::Up, 70), 75);
    }

    #[test]
    fn snap_down_rounds_up_first() {
        let c = SetSpeedController::default();
        assert_eq!(c.snap(Direction::Down, 66), 65);
        assert_eq!(c.snap(Direction::Down, 69), 65);
        assert_eq!(c.snap(Direction::Down, 65), 60);
    }

    #[test]
    fn phase_from_parts() {
        assert_eq!(PressPhase::from_parts(false, 7, 50), PressPhase::Idle);
        assert_eq!(
            PressPhase::from_parts(true, 7, 50),
            PressPhase::Short { ticks: 7 }
        );
        assert_eq!(
            PressPhase::from_parts(true, 50, 50),
            PressPhase::Long { ticks: 50 }
        );
    }

    #[test]
    fn held_promotes_to_long() {
        let mut p = PressPhase::Idle;
        for _ in 0..49 {
            p = p.held(50);
        }
        assert_eq!(p, PressPhase::Short { ticks: 49 });
        p = p.held(50);
        assert_eq!(p, PressPhase::Long { ticks: 50 });
        assert!(p.on_snap_boundary(50));
        assert!(!p.held(50).on_snap_boundary(50));
    }
}
