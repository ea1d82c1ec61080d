use cruise_core::error::BuildError;
use cruise_core::{AccelCfg, ChimeCfg, CruiseController, FollowCfg, SetSpeedCfg};
use rstest::rstest;

fn expect_invalid(result: cruise_core::Result<CruiseController>) -> &'static str {
    let err = result.expect_err("should fail validation");
    match err.downcast_ref::<BuildError>() {
        Some(BuildError::InvalidConfig(msg)) => *msg,
        other => panic!("expected InvalidConfig, got: {other:?}"),
    }
}

#[rstest]
#[case::min_zero(SetSpeedCfg { min_mph: 0.0, ..SetSpeedCfg::default() }, "min set speed must be > 0")]
#[case::inverted(SetSpeedCfg { min_mph: 50.0, max_mph: 40.0, ..SetSpeedCfg::default() }, "max set speed must be >= min set speed")]
#[case::nan(SetSpeedCfg { max_mph: f32::NAN, ..SetSpeedCfg::default() }, "set speed bounds must be finite")]
#[case::long_press(SetSpeedCfg { long_press_ticks: 0, ..SetSpeedCfg::default() }, "long_press_ticks must be >= 1")]
#[case::step(SetSpeedCfg { long_step_mph: 0, ..SetSpeedCfg::default() }, "press steps must be >= 1 mph")]
fn rejects_bad_set_speed(#[case] cfg: SetSpeedCfg, #[case] msg: &str) {
    let got = expect_invalid(CruiseController::builder().with_set_speed(cfg).build());
    assert_eq!(got, msg);
}

#[rstest]
#[case::inverted(AccelCfg { min: 1.0, max: -1.0, ..AccelCfg::default() }, "accel min must be <= accel max")]
#[case::gap(AccelCfg { hyst_gap: -0.1, ..AccelCfg::default() }, "hysteresis gap must be finite and >= 0")]
#[case::inf(AccelCfg { max: f32::INFINITY, ..AccelCfg::default() }, "accel limits must be finite")]
fn rejects_bad_accel(#[case] cfg: AccelCfg, #[case] msg: &str) {
    let got = expect_invalid(CruiseController::builder().with_accel(cfg).build());
    assert_eq!(got, msg);
}

#[test]
fn rejects_silent_chime() {
    let got = expect_invalid(
        CruiseController::builder()
            .with_chime(ChimeCfg {
                chime_ticks: 0,
                gap_ticks: 5,
            })
            .build(),
    );
    assert_eq!(got, "chime_ticks must be >= 1");
}

#[rstest]
#[case(0)]
#[case(5)]
fn rejects_follow_out_of_range(#[case] initial: u8) {
    let got = expect_invalid(
        CruiseController::builder()
            .with_follow(FollowCfg { initial })
            .build(),
    );
    assert_eq!(got, "initial follow distance must be in [1, 4]");
}

#[test]
fn rejects_zero_tick_rate() {
    let got = expect_invalid(CruiseController::builder().with_tick_rate_hz(0).build());
    assert_eq!(got, "tick_rate_hz must be > 0");
}

#[test]
fn out_of_range_smoothing_factor_is_accepted() {
    let ctl = CruiseController::builder()
        .with_accel(AccelCfg {
            smoothing_factor: 1.5,
            ..AccelCfg::default()
        })
        .build();
    assert!(ctl.is_ok());
}
