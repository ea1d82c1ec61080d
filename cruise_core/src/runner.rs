//! Replay a recorded (or scripted) tick sequence through a controller.
//!
//! Replays run as fast as possible by default. With pacing enabled each tick
//! is scheduled against a fixed deadline grid derived from `tick_rate_hz`, so
//! a slow tick does not push every later tick back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cruise_traits::Clock;

use crate::controller::CruiseController;
use crate::error::{CruiseError, Result};
use crate::state::TickInputs;
use crate::status::TickOutputs;
use crate::units::ms_to_mph;

/// One scripted tick: the inputs plus which of the feedback fields were
/// given explicitly. Missing ones are filled from the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScriptTick {
    pub inputs: TickInputs,
    /// Raw planner acceleration request (m/s^2).
    pub accel_request: f32,
    /// `inputs.set_speed` was recorded; otherwise the previous output is fed back.
    pub explicit_set_speed: bool,
    /// `inputs.acc_enabled_prev` was recorded; otherwise the previous row's
    /// `acc_enabled` is used.
    pub explicit_enabled_prev: bool,
}

impl ScriptTick {
    /// A tick with every feedback field left to the runner.
    pub fn new(inputs: TickInputs, accel_request: f32) -> Self {
        Self {
            inputs,
            accel_request,
            explicit_set_speed: false,
            explicit_enabled_prev: false,
        }
    }
}

/// Summary of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReplayStats {
    pub ticks: usize,
    pub engaged_ticks: usize,
    pub engage_edges: usize,
    pub disengage_edges: usize,
    /// Ticks during which a cluster tone was sounding.
    pub chime_ticks: usize,
    pub min_set_speed_mph: f32,
    pub max_set_speed_mph: f32,
    pub max_abs_accel: f32,
    /// Control time covered at the configured tick rate.
    pub control_ms: u64,
    /// Clock time spent, as seen by the injected clock.
    pub wall_us: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub outputs: Vec<TickOutputs>,
    pub stats: ReplayStats,
}

/// Fill the feedback fields a script left out.
#[inline]
fn resolve(tick: &ScriptTick, prev_out: Option<&TickOutputs>, prev_enabled: bool) -> TickInputs {
    let mut inputs = tick.inputs;
    if !tick.explicit_set_speed {
        inputs.set_speed = prev_out.map_or(0.0, |o| o.set_speed);
    }
    if !tick.explicit_enabled_prev {
        inputs.acc_enabled_prev = prev_enabled;
    }
    inputs
}

fn accumulate(stats: &mut ReplayStats, inputs: &TickInputs, out: &TickOutputs) {
    let mph = ms_to_mph(out.set_speed);
    if stats.ticks == 0 {
        stats.min_set_speed_mph = mph;
        stats.max_set_speed_mph = mph;
    } else {
        stats.min_set_speed_mph = stats.min_set_speed_mph.min(mph);
        stats.max_set_speed_mph = stats.max_set_speed_mph.max(mph);
    }
    stats.ticks += 1;
    if out.engaged() {
        stats.engaged_ticks += 1;
    }
    if !inputs.acc_enabled_prev && inputs.acc_enabled {
        stats.engage_edges += 1;
    } else if inputs.acc_enabled_prev && !inputs.acc_enabled {
        stats.disengage_edges += 1;
    }
    if out.chime_active {
        stats.chime_ticks += 1;
    }
    stats.max_abs_accel = stats.max_abs_accel.max(out.accel_cmd.abs());
}

/// Drive `controller` over `ticks`.
///
/// With `paced` set, sleeps on `clock` so tick `i` starts no earlier than
/// `i` periods after the first. `shutdown` is checked before every tick; when
/// raised the replay stops with `CruiseError::Interrupted`.
pub fn replay<C: Clock>(
    controller: &mut CruiseController,
    ticks: &[ScriptTick],
    clock: &C,
    paced: bool,
    shutdown: Option<&AtomicBool>,
) -> Result<ReplayReport> {
    let hz = controller.params().tick_rate_hz;
    let period_us = crate::util::period_us(hz);
    let epoch = clock.now();
    let mut report = ReplayReport {
        outputs: Vec::with_capacity(ticks.len()),
        stats: ReplayStats::default(),
    };
    let mut prev_enabled = false;

    tracing::info!(ticks = ticks.len(), hz, paced, "replay start");
    for (i, tick) in ticks.iter().enumerate() {
        if shutdown.is_some_and(|f| f.load(Ordering::Relaxed)) {
            tracing::warn!(completed = i, "replay interrupted");
            return Err(eyre::Report::new(CruiseError::Interrupted { completed: i }));
        }
        if paced {
            let due_us = period_us.saturating_mul(i as u64);
            let now_us = clock.us_since(epoch);
            if due_us > now_us {
                clock.sleep(Duration::from_micros(due_us - now_us));
            }
        }

        let inputs = resolve(tick, report.outputs.last(), prev_enabled);
        let out = controller.step(&inputs, tick.accel_request);
        accumulate(&mut report.stats, &inputs, &out);
        report.outputs.push(out);
        prev_enabled = inputs.acc_enabled;
    }

    report.stats.control_ms = crate::util::ticks_to_ms(report.stats.ticks as u64, hz);
    report.stats.wall_us = clock.us_since(epoch);
    tracing::info!(
        ticks = report.stats.ticks,
        engaged = report.stats.engaged_ticks,
        wall_us = report.stats.wall_us,
        "replay done"
    );
    Ok(report)
}
