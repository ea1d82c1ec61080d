use cruise_core::units::{mph_to_ms, ms_to_whole_mph};
use cruise_core::{
    PressPhase, SET_SPEED_MAX, SET_SPEED_MIN, SetSpeedController, SetSpeedInputs, SetSpeedState,
    set_speed_logic,
};
use rstest::rstest;

fn engaged(set_mph: f32) -> SetSpeedInputs {
    SetSpeedInputs {
        set_speed: mph_to_ms(set_mph),
        acc_enabled: true,
        acc_enabled_prev: true,
        vego: mph_to_ms(set_mph),
        ..Default::default()
    }
}

/// Hold a button for `n` ticks, feeding each output back as the next input.
/// Returns the set speed (whole mph) after every tick.
fn hold(
    ctl: &SetSpeedController,
    mut state: SetSpeedState,
    start_mph: f32,
    plus: bool,
    n: usize,
) -> (SetSpeedState, Vec<i32>) {
    let mut set_speed = mph_to_ms(start_mph);
    let mut trace = Vec::with_capacity(n);
    for _ in 0..n {
        let input = SetSpeedInputs {
            set_speed,
            setplus: plus,
            setminus: !plus,
            ..engaged(0.0)
        };
        let (next, out) = ctl.step(state, &SetSpeedInputs { vego: mph_to_ms(50.0), ..input });
        state = next;
        set_speed = out;
        trace.push(ms_to_whole_mph(out));
    }
    (state, trace)
}

#[test]
fn short_press_adds_one_mph() {
    let (out, short_press, timer, gas_set, _, gas_timer) = set_speed_logic(
        mph_to_ms(65.0),
        true,
        true,
        true,
        false,
        false,
        0,
        0.0,
        false,
        mph_to_ms(65.0),
        false,
        false,
        0,
    );
    assert_eq!(ms_to_whole_mph(out), 66);
    assert!(short_press);
    assert_eq!(timer, 1);
    assert!(!gas_set);
    assert_eq!(gas_timer, 0);
}

#[test]
fn short_press_minus_subtracts_one_mph() {
    let ctl = SetSpeedController::default();
    let (state, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            setminus: true,
            ..engaged(65.0)
        },
    );
    assert_eq!(ms_to_whole_mph(out), 64);
    assert_eq!(state.press, PressPhase::Short { ticks: 1 });
}

#[test]
fn setplus_has_priority_over_setminus() {
    let ctl = SetSpeedController::default();
    let (_, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            setplus: true,
            setminus: true,
            ..engaged(40.0)
        },
    );
    assert_eq!(ms_to_whole_mph(out), 41);
}

#[test]
fn long_press_up_snaps_to_multiples_of_five() {
    let ctl = SetSpeedController::default();
    let (state, trace) = hold(&ctl, SetSpeedState::default(), 65.0, true, 101);
    assert_eq!(trace[0], 66);
    assert!(trace[1..50].iter().all(|&v| v == 66));
    assert_eq!(trace[50], 70, "tick 51 snaps");
    assert!(trace[51..100].iter().all(|&v| v == 70));
    assert_eq!(trace[100], 75, "tick 101 snaps");
    assert_eq!(state.press, PressPhase::Long { ticks: 101 });
    for v in [trace[50], trace[100]] {
        assert_eq!(v % 5, 0);
    }
}

#[test]
fn long_press_down_rounds_up_then_subtracts() {
    let ctl = SetSpeedController::default();
    let (_, trace) = hold(&ctl, SetSpeedState::default(), 67.0, false, 101);
    assert_eq!(trace[0], 66);
    // 66 is unaligned: round up to 70, then step down to 65.
    assert_eq!(trace[50], 65);
    assert_eq!(trace[100], 60);
}

#[test]
fn release_returns_to_idle() {
    let ctl = SetSpeedController::default();
    let (state, _) = hold(&ctl, SetSpeedState::default(), 50.0, true, 10);
    assert!(state.short_press());
    let (state, out) = ctl.step(state, &engaged(51.0));
    assert_eq!(state.press, PressPhase::Idle);
    assert_eq!(state.timer(), 0);
    assert_eq!(ms_to_whole_mph(out), 51);
}

#[test]
fn gas_override_snaps_up_to_vego_and_latches() {
    let ctl = SetSpeedController::default();
    let input = SetSpeedInputs {
        set_speed: mph_to_ms(40.0),
        vego: mph_to_ms(50.0),
        gas: true,
        setplus: true,
        ..engaged(0.0)
    };
    let (state, out) = ctl.step(SetSpeedState::default(), &input);
    assert_eq!(ms_to_whole_mph(out), 50);
    assert!(state.gas_set);

    // Release the button, keep the pedal down.
    let (state, out) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: out,
            setplus: false,
            ..input
        },
    );
    assert_eq!(state.gas_timer, 1);

    // A second press while latched is an ordinary +1.
    let (state, out) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: out,
            ..input
        },
    );
    assert_eq!(ms_to_whole_mph(out), 51);
    assert!(state.gas_set);
}

#[test]
fn gas_override_above_vego_is_plain_increment() {
    let ctl = SetSpeedController::default();
    let (state, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            set_speed: mph_to_ms(60.0),
            vego: mph_to_ms(50.0),
            gas: true,
            setplus: true,
            ..engaged(0.0)
        },
    );
    assert_eq!(ms_to_whole_mph(out), 61);
    assert!(state.gas_set);
}

#[test]
fn gas_override_minus_snaps_down_to_vego() {
    let ctl = SetSpeedController::default();
    let (state, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            set_speed: mph_to_ms(60.0),
            vego: mph_to_ms(50.0),
            gas: true,
            setminus: true,
            ..engaged(0.0)
        },
    );
    assert_eq!(ms_to_whole_mph(out), 50);
    assert!(state.gas_set);
}

#[test]
fn pedal_release_clears_override() {
    let ctl = SetSpeedController::default();
    let state = SetSpeedState {
        gas_set: true,
        gas_timer: 42,
        ..Default::default()
    };
    let (state, _) = ctl.step(state, &engaged(50.0));
    assert!(!state.gas_set);
    assert_eq!(state.gas_timer, 0);
}

#[test]
fn long_override_kept_without_decrease() {
    let ctl = SetSpeedController::default();
    let state = SetSpeedState {
        gas_set: true,
        gas_timer: 201,
        ..Default::default()
    };
    let (state, _) = ctl.step(
        state,
        &SetSpeedInputs {
            gas: true,
            ..engaged(50.0)
        },
    );
    // No decrease pressed: latch kept, timer keeps counting.
    assert!(state.gas_set);
    assert_eq!(state.gas_timer, 202);
}

#[test]
fn long_override_cleared_by_decrease() {
    let ctl = SetSpeedController::default();
    let state = SetSpeedState {
        gas_set: true,
        gas_timer: 201,
        ..Default::default()
    };
    let (state, out) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: mph_to_ms(60.0),
            vego: mph_to_ms(55.0),
            gas: true,
            setminus: true,
            ..engaged(0.0)
        },
    );
    // The stale latch is dropped, so the same press re-arms the override
    // and snaps to the current speed.
    assert_eq!(ms_to_whole_mph(out), 55);
    assert!(state.gas_set);
    assert_eq!(state.gas_timer, 0);
}

#[test]
fn disable_then_resume_restores_target() {
    let ctl = SetSpeedController::default();
    let (state, out) = ctl.step(SetSpeedState::default(), &engaged(65.0));
    assert_eq!(ms_to_whole_mph(out), 65);

    let (state, _) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: out,
            acc_enabled: false,
            acc_enabled_prev: true,
            vego: mph_to_ms(40.0),
            ..Default::default()
        },
    );
    assert_eq!(ms_to_whole_mph(state.ressetspeed()), 65);

    let (state, _) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: mph_to_ms(40.0),
            vego: mph_to_ms(40.0),
            ..Default::default()
        },
    );
    assert_eq!(state.press, PressPhase::Idle);

    let (resumed, out) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: mph_to_ms(40.0),
            acc_enabled: true,
            resbut: true,
            vego: mph_to_ms(40.0),
            ..Default::default()
        },
    );
    assert_eq!(ms_to_whole_mph(out), 65);
    assert_eq!(resumed.press, PressPhase::Short { ticks: 1 });

    // Engaging with SET instead of RES takes the current speed.
    let (_, out) = ctl.step(
        state,
        &SetSpeedInputs {
            set_speed: mph_to_ms(40.0),
            acc_enabled: true,
            vego: mph_to_ms(43.0),
            ..Default::default()
        },
    );
    assert_eq!(ms_to_whole_mph(out), 43);
}

#[rstest]
#[case::above_max(120.0, true, 120)]
#[case::below_min(5.0, false, 5)]
fn output_is_clipped(#[case] start: f32, #[case] plus: bool, #[case] expect: i32) {
    let ctl = SetSpeedController::default();
    let (_, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            setplus: plus,
            setminus: !plus,
            ..engaged(start)
        },
    );
    assert_eq!(ms_to_whole_mph(out), expect);
    assert!((SET_SPEED_MIN..=SET_SPEED_MAX).contains(&out));
}

#[test]
fn disabled_zero_speed_clips_to_min() {
    let (out, short_press, timer, ..) = set_speed_logic(
        0.0, false, false, false, false, false, 7, 0.0, true, 0.0, false, false, 0,
    );
    assert_eq!(out, SET_SPEED_MIN);
    assert!(!short_press);
    assert_eq!(timer, 0);
}

/// Engage edge at `vego_mph` with no buttons; returns the whole-mph target.
fn engage_at(vego_mph: f32) -> i32 {
    let (out, ..) = set_speed_logic(
        0.0,
        true,
        false,
        false,
        false,
        false,
        0,
        0.0,
        false,
        mph_to_ms(vego_mph),
        false,
        false,
        0,
    );
    ms_to_whole_mph(out)
}

#[rstest]
#[case::half_down_to_even(64.5, 64)]
#[case::half_up_to_even(65.5, 66)]
#[case::half_down_above(66.5, 66)]
#[case::grid_half(70.5, 70)]
#[case::below_band(2.5, 5)]
fn engage_half_mph_rounds_to_even(#[case] vego_mph: f32, #[case] expect: i32) {
    assert_eq!(engage_at(vego_mph), expect);
}

#[test]
fn short_press_from_half_mph_steps_from_even_neighbour() {
    let (out, ..) = set_speed_logic(
        mph_to_ms(64.5),
        true,
        true,
        true,
        false,
        false,
        0,
        0.0,
        false,
        mph_to_ms(64.5),
        false,
        false,
        0,
    );
    assert_eq!(ms_to_whole_mph(out), 65);
}

#[test]
fn overflowing_targets_saturate_to_max() {
    let ctl = SetSpeedController::default();
    let (_, out) = ctl.step(
        SetSpeedState::default(),
        &SetSpeedInputs {
            set_speed: f32::MAX,
            ..engaged(0.0)
        },
    );
    assert_eq!(out, SET_SPEED_MAX);

    // Resume from an overflowing stored speed.
    let (out, ..) = set_speed_logic(
        0.0,
        true,
        false,
        false,
        false,
        true,
        0,
        f32::MAX,
        false,
        0.0,
        false,
        false,
        0,
    );
    assert_eq!(out, SET_SPEED_MAX);
}

#[test]
fn adapter_drops_timer_without_short_press() {
    // `(short_press = false, timer = 7)` is read as idle, so a press starts
    // counting from 1.
    let (out, short_press, timer, ..) = set_speed_logic(
        mph_to_ms(65.0),
        true,
        true,
        true,
        false,
        false,
        7,
        0.0,
        false,
        mph_to_ms(65.0),
        false,
        false,
        0,
    );
    assert_eq!(ms_to_whole_mph(out), 66);
    assert!(short_press);
    assert_eq!(timer, 1);
}
