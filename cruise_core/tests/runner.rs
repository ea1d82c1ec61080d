use std::sync::atomic::AtomicBool;

use cruise_core::error::CruiseError;
use cruise_core::units::{mph_to_ms, ms_to_whole_mph};
use cruise_core::{CruiseController, ScriptTick, TickInputs, replay};
use cruise_traits::ManualClock;

fn script() -> Vec<ScriptTick> {
    let idle = TickInputs {
        acc_available: true,
        vego: mph_to_ms(45.0),
        ..Default::default()
    };
    let on = TickInputs {
        acc_enabled: true,
        ..idle
    };
    let mut ticks = vec![ScriptTick::new(idle, 0.0); 3];
    ticks.extend(std::iter::repeat_n(ScriptTick::new(on, 0.3), 4));
    ticks.push(ScriptTick::new(
        TickInputs {
            setplus: true,
            ..on
        },
        0.3,
    ));
    ticks.extend(std::iter::repeat_n(ScriptTick::new(idle, -0.5), 2));
    ticks
}

#[test]
fn replay_feeds_back_set_speed_and_enabled() {
    let mut ctl = CruiseController::builder().build().expect("build");
    let clock = ManualClock::new();
    let report = replay(&mut ctl, &script(), &clock, false, None).expect("replay");

    assert_eq!(report.outputs.len(), 10);
    // Engaged at vego, held through the feedback loop, then +1.
    assert_eq!(ms_to_whole_mph(report.outputs[3].set_speed), 45);
    assert_eq!(ms_to_whole_mph(report.outputs[6].set_speed), 45);
    assert_eq!(ms_to_whole_mph(report.outputs[7].set_speed), 46);

    let stats = report.stats;
    assert_eq!(stats.ticks, 10);
    assert_eq!(stats.engaged_ticks, 5);
    assert_eq!(stats.engage_edges, 1);
    assert_eq!(stats.disengage_edges, 1);
    // Engage pulse cut short by the disengage pulse two ticks before the end.
    assert_eq!(stats.chime_ticks, 7);
    assert!((stats.max_set_speed_mph - 46.0).abs() < 0.01);
    assert_eq!(stats.control_ms, 100);
    assert_eq!(stats.wall_us, 0, "unpaced replay never sleeps");
    assert_eq!(ms_to_whole_mph(ctl.state().ressetspeed()), 46);
}

#[test]
fn paced_replay_schedules_on_tick_grid() {
    let mut ctl = CruiseController::builder().build().expect("build");
    let clock = ManualClock::new();
    let report = replay(&mut ctl, &script(), &clock, true, None).expect("replay");
    // Ten ticks at 100 Hz: nine full periods between the first and last.
    assert_eq!(report.stats.wall_us, 90_000);
}

#[test]
fn paced_replay_uses_configured_rate() {
    let mut ctl = CruiseController::builder()
        .with_tick_rate_hz(50)
        .build()
        .expect("build");
    let clock = ManualClock::new();
    let report = replay(&mut ctl, &script(), &clock, true, None).expect("replay");
    assert_eq!(report.stats.wall_us, 180_000);
    assert_eq!(report.stats.control_ms, 200);
}

#[test]
fn shutdown_flag_interrupts() {
    let mut ctl = CruiseController::builder().build().expect("build");
    let stop = AtomicBool::new(true);
    let err = replay(&mut ctl, &script(), &ManualClock::new(), false, Some(&stop))
        .expect_err("should stop");
    match err.downcast_ref::<CruiseError>() {
        Some(CruiseError::Interrupted { completed }) => assert_eq!(*completed, 0),
        other => panic!("expected Interrupted, got: {other:?}"),
    }
    assert_eq!(ctl.ticks(), 0);
}
