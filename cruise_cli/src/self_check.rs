//! `self-check`: build a controller from the loaded config and drive a short
//! engage / adjust / disengage / resume scenario through it.

use cruise_core::units::{clip, mph_to_ms, ms_to_mph, ms_to_whole_mph, whole_mph_to_ms};
use cruise_core::{CruiseController, CruiseParams, CruiseState, ScriptTick, TickInputs};
use cruise_traits::ManualClock;

struct Scenario {
    ticks: Vec<ScriptTick>,
    engage_at: usize,
    plus_at: usize,
    disengage_at: usize,
    resume_at: usize,
}

fn scenario(cruise_mph: f32) -> Scenario {
    let ready = TickInputs {
        acc_available: true,
        vego: mph_to_ms(cruise_mph),
        ..Default::default()
    };
    let on = TickInputs {
        acc_enabled: true,
        ..ready
    };
    let mut ticks = vec![ScriptTick::new(ready, 0.0); 2];
    let engage_at = ticks.len();
    ticks.push(ScriptTick::new(on, 0.5));
    ticks.push(ScriptTick::new(on, 0.5));
    let plus_at = ticks.len();
    ticks.push(ScriptTick::new(
        TickInputs {
            setplus: true,
            ..on
        },
        0.5,
    ));
    ticks.push(ScriptTick::new(on, 0.5));
    let disengage_at = ticks.len();
    ticks.extend(std::iter::repeat_n(ScriptTick::new(ready, -1.0), 20));
    let resume_at = ticks.len();
    ticks.push(ScriptTick::new(
        TickInputs {
            resbut: true,
            ..on
        },
        0.0,
    ));
    Scenario {
        ticks,
        engage_at,
        plus_at,
        disengage_at,
        resume_at,
    }
}

fn check(ok: bool, what: &str, failures: &mut Vec<String>) {
    if ok {
        tracing::debug!(what, "self-check step ok");
    } else {
        tracing::error!(what, "self-check step failed");
        failures.push(what.to_string());
    }
}

pub fn run_self_check(cfg: &cruise_config::Config, json: bool) -> eyre::Result<()> {
    let params = CruiseParams::from(cfg);
    let s = &params.set_speed;
    let mid = ms_to_whole_mph(mph_to_ms(0.5 * (s.min_mph + s.max_mph)));
    let in_band = |mph: i32| ms_to_whole_mph(clip(whole_mph_to_ms(mph), s.min_ms(), s.max_ms()));
    let expect_engage = in_band(mid);
    let expect_plus = in_band(expect_engage.saturating_add(s.short_step_mph));

    let mut ctl = CruiseController::builder().with_params(params.clone()).build()?;
    let sc = scenario(ms_to_mph(whole_mph_to_ms(mid)));
    let report = cruise_core::replay(&mut ctl, &sc.ticks, &ManualClock::new(), false, None)?;
    let out = &report.outputs;

    let mut failures = Vec::new();
    let engage = &out[sc.engage_at];
    check(
        ms_to_whole_mph(engage.set_speed) == expect_engage,
        "engage takes current speed",
        &mut failures,
    );
    check(
        engage.cruise_state == CruiseState::Engaged && engage.chime_val == 4,
        "engage chime and cluster state",
        &mut failures,
    );
    check(
        ms_to_whole_mph(out[sc.plus_at].set_speed) == expect_plus,
        "short press steps the target",
        &mut failures,
    );
    let disengage = &out[sc.disengage_at];
    check(
        disengage.cruise_state == CruiseState::Ready && disengage.chime_val == 7,
        "disengage chime and cluster state",
        &mut failures,
    );
    check(
        ms_to_whole_mph(out[sc.resume_at].set_speed) == expect_plus,
        "resume restores the previous target",
        &mut failures,
    );
    // The smoothed command starts from zero, so zero is always reachable.
    let (lo, hi) = (params.accel.min.min(0.0), params.accel.max.max(0.0));
    check(
        out.iter().all(|o| o.accel_cmd >= lo && o.accel_cmd <= hi),
        "accel command stays within limits",
        &mut failures,
    );

    if !failures.is_empty() {
        eyre::bail!("self-check failed: {}", failures.join("; "));
    }
    if json {
        println!(
            "{}",
            serde_json::json!({ "self_check": "ok", "ticks": report.stats.ticks })
        );
    } else {
        println!("self-check ok ({} ticks)", report.stats.ticks);
    }
    Ok(())
}
