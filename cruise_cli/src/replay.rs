//! `replay`: run a CSV tick script through the controller and print one line
//! per tick plus a summary.

use cruise_core::error::{CruiseError, Result as CoreResult};
use cruise_core::units::ms_to_mph;
use cruise_core::{CruiseController, CruiseParams, ReplayReport, ReplayStats, ScriptTick, TickOutputs};
use cruise_traits::MonotonicClock;
use serde_json::json;
use std::path::Path;
use std::sync::atomic::AtomicBool;

pub fn run_replay(
    cfg: &cruise_config::Config,
    inputs: &Path,
    paced: bool,
    stats: bool,
    json: bool,
    shutdown: &AtomicBool,
) -> CoreResult<()> {
    let rows = cruise_config::load_tick_script_csv(inputs)
        .map_err(|e| eyre::Report::new(CruiseError::Script(format!("{e:#}"))))?;
    let ticks: Vec<ScriptTick> = rows.iter().map(ScriptTick::from).collect();

    let params = CruiseParams::from(cfg);
    let mut ctl = CruiseController::builder().with_params(params).build()?;
    let clock = MonotonicClock::new();
    let t0 = std::time::Instant::now();
    let report = cruise_core::replay(&mut ctl, &ticks, &clock, paced, Some(shutdown))?;

    print_report(&report, json);
    if stats {
        print_stats(&report.stats, ctl.params().tick_rate_hz, t0.elapsed());
    }
    Ok(())
}

fn tick_json(i: usize, o: &TickOutputs) -> serde_json::Value {
    json!({
        "tick": i,
        "set_speed_mph": ms_to_mph(o.set_speed),
        "cruise_state": o.cruise_state.code(),
        "cruise_icon": o.cruise_icon,
        "follow_set": o.follow_set,
        "accel_cmd": o.accel_cmd,
        "chime_val": o.chime_val,
        "chime_active": o.chime_active,
    })
}

fn summary_json(s: &ReplayStats) -> serde_json::Value {
    json!({
        "summary": {
            "ticks": s.ticks,
            "engaged_ticks": s.engaged_ticks,
            "engage_edges": s.engage_edges,
            "disengage_edges": s.disengage_edges,
            "chime_ticks": s.chime_ticks,
            "min_set_speed_mph": s.min_set_speed_mph,
            "max_set_speed_mph": s.max_set_speed_mph,
            "max_abs_accel": s.max_abs_accel,
            "control_ms": s.control_ms,
        }
    })
}

fn print_report(report: &ReplayReport, json: bool) {
    for (i, o) in report.outputs.iter().enumerate() {
        if json {
            println!("{}", tick_json(i, o));
        } else {
            println!(
                "tick {i:>6}  set {:>6.1} mph  state {}  icon {:>2}  follow {}  accel {:+.3}  chime {}{}",
                ms_to_mph(o.set_speed),
                o.cruise_state.code(),
                o.cruise_icon,
                o.follow_set,
                o.accel_cmd,
                o.chime_val,
                if o.chime_active { " *" } else { "" },
            );
        }
    }
    let s = &report.stats;
    if json {
        println!("{}", summary_json(s));
    } else {
        println!(
            "replay complete: {} ticks, {} engaged, set speed {:.0}..{:.0} mph",
            s.ticks, s.engaged_ticks, s.min_set_speed_mph, s.max_set_speed_mph
        );
    }
}

/// Print run stats to stderr.
fn print_stats(s: &ReplayStats, tick_rate_hz: u32, wall: std::time::Duration) {
    eprintln!("\n--- Replay Stats ---");
    eprintln!("Ticks: {} ({} Hz, {} ms control time)", s.ticks, tick_rate_hz, s.control_ms);
    eprintln!("Engaged ticks: {}", s.engaged_ticks);
    eprintln!("Engage/disengage edges: {} / {}", s.engage_edges, s.disengage_edges);
    eprintln!("Chime ticks: {}", s.chime_ticks);
    eprintln!("Max |accel cmd| (m/s^2): {:.3}", s.max_abs_accel);
    eprintln!("Wall time (ms): {:.1}", wall.as_secs_f64() * 1000.0);
    eprintln!("--------------------\n");
}
