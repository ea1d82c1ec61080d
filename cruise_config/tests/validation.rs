use cruise_config::{CarVariant, load_toml};
use rstest::rstest;

const FULL: &str = r#"
[set_speed]
min_mph = 5.0
max_mph = 120.0
long_press_ticks = 50
short_step_mph = 1
long_step_mph = 5
gas_release_ticks = 200

[accel]
hyst_gap = 0.0
min = -3.8
max = 2.0
smoothing_factor = 0.4

[chime]
chime_ticks = 8
gap_ticks = 5

[follow]
initial = 2

[runner]
tick_rate_hz = 100

[logging]
level = "debug"
rotation = "daily"

[vehicle]
car = "RAM_1500_5TH_GEN"
fingerprint = [720, 291]
eps_fw = ["68312176AE"]
"#;

#[test]
fn accepts_full_config() {
    let cfg = load_toml(FULL).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert_eq!(cfg.follow.initial, 2);
    assert_eq!(cfg.vehicle.car, Some(CarVariant::Ram1500));
    assert_eq!(cfg.vehicle.fingerprint, vec![720, 291]);
}

#[test]
fn partial_sections_keep_defaults() {
    let cfg = load_toml(
        r#"
[set_speed]
max_mph = 85.0
"#,
    )
    .expect("parse TOML");
    cfg.validate().unwrap();
    assert!((cfg.set_speed.max_mph - 85.0).abs() < f32::EPSILON);
    assert!((cfg.set_speed.min_mph - 5.0).abs() < f32::EPSILON);
    assert_eq!(cfg.set_speed.gas_release_ticks, 200);
}

#[rstest]
#[case("[set_speed]\nmax_mph = 4.0", "set_speed.max_mph must be >= set_speed.min_mph")]
#[case("[set_speed]\nmin_mph = 0.0", "set_speed.min_mph must be > 0")]
#[case("[set_speed]\nlong_press_ticks = 0", "long_press_ticks must be >= 1")]
#[case("[set_speed]\nlong_step_mph = 0", "long_step_mph must be >= 1")]
#[case("[accel]\nmin = 3.0", "accel.min must be <= accel.max")]
#[case("[accel]\nhyst_gap = -0.1", "hyst_gap must be >= 0.0")]
#[case("[accel]\nsmoothing_factor = 1.5", "smoothing_factor must be in [0.0, 1.0]")]
#[case("[chime]\nchime_ticks = 0", "chime.chime_ticks must be >= 1")]
#[case("[follow]\ninitial = 5", "follow.initial must be in [1, 4]")]
#[case("[runner]\ntick_rate_hz = 0", "tick_rate_hz must be > 0")]
#[case("[logging]\nrotation = \"weekly\"", "logging.rotation must be one of")]
fn rejects_out_of_range(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "expected {needle:?} in {err}"
    );
}

#[test]
fn unknown_car_fails_to_parse() {
    let err = load_toml("[vehicle]\ncar = \"DODGE_VIPER\"").expect_err("unknown variant");
    assert!(format!("{err}").contains("DODGE_VIPER"));
}
