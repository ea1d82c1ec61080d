//! Static per-variant vehicle parameters for the Chrysler/Jeep/Ram platform.
//!
//! This is a pure lookup: nothing here carries runtime state, and the
//! per-tick cruise components never read it. The CLI exposes it through
//! `cruise_cli params`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Safety hook flag: Ram 1500 (DT platform) message layout.
pub const FLAG_CHRYSLER_RAM_DT: u16 = 1;
/// Safety hook flag: Ram 2500/3500 (HD platform) message layout.
pub const FLAG_CHRYSLER_RAM_HD: u16 = 2;

/// CAN address whose presence means blind-spot monitoring is fitted.
const BSM_ADDR: u32 = 720;
/// CAN addresses broadcast only by the hybrid powertrain ECU.
const HYBRID_ECU_ADDRS: [u32; 2] = [655, 291];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CarVariant {
    #[serde(rename = "CHRYSLER_PACIFICA_2018")]
    ChryslerPacifica2018,
    #[serde(rename = "CHRYSLER_PACIFICA_2018_HYBRID")]
    ChryslerPacifica2018Hybrid,
    #[serde(rename = "CHRYSLER_PACIFICA_2019_HYBRID")]
    ChryslerPacifica2019Hybrid,
    #[serde(rename = "CHRYSLER_PACIFICA_2020")]
    ChryslerPacifica2020,
    #[serde(rename = "JEEP_GRAND_CHEROKEE")]
    JeepGrandCherokee,
    #[serde(rename = "JEEP_GRAND_CHEROKEE_2019")]
    JeepGrandCherokee2019,
    /// Ram 1500, 5th generation (DT)
    #[serde(rename = "RAM_1500_5TH_GEN")]
    Ram1500,
    /// Ram 2500/3500, 5th generation (HD)
    #[serde(rename = "RAM_HD_5TH_GEN")]
    RamHd,
}

impl CarVariant {
    pub const ALL: [CarVariant; 8] = [
        CarVariant::ChryslerPacifica2018,
        CarVariant::ChryslerPacifica2018Hybrid,
        CarVariant::ChryslerPacifica2019Hybrid,
        CarVariant::ChryslerPacifica2020,
        CarVariant::JeepGrandCherokee,
        CarVariant::JeepGrandCherokee2019,
        CarVariant::Ram1500,
        CarVariant::RamHd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CarVariant::ChryslerPacifica2018 => "CHRYSLER_PACIFICA_2018",
            CarVariant::ChryslerPacifica2018Hybrid => "CHRYSLER_PACIFICA_2018_HYBRID",
            CarVariant::ChryslerPacifica2019Hybrid => "CHRYSLER_PACIFICA_2019_HYBRID",
            CarVariant::ChryslerPacifica2020 => "CHRYSLER_PACIFICA_2020",
            CarVariant::JeepGrandCherokee => "JEEP_GRAND_CHEROKEE",
            CarVariant::JeepGrandCherokee2019 => "JEEP_GRAND_CHEROKEE_2019",
            CarVariant::Ram1500 => "RAM_1500_5TH_GEN",
            CarVariant::RamHd => "RAM_HD_5TH_GEN",
        }
    }

    fn is_pacifica(self) -> bool {
        matches!(
            self,
            CarVariant::ChryslerPacifica2018
                | CarVariant::ChryslerPacifica2018Hybrid
                | CarVariant::ChryslerPacifica2019Hybrid
                | CarVariant::ChryslerPacifica2020
        )
    }

    fn is_grand_cherokee(self) -> bool {
        matches!(
            self,
            CarVariant::JeepGrandCherokee | CarVariant::JeepGrandCherokee2019
        )
    }
}

impl fmt::Display for CarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CarVariant {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CarVariant::ALL
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| eyre::eyre!("unsupported car: {wanted:?}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyModel {
    Chrysler,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyConfig {
    pub model: SafetyModel,
    pub param: u16,
}

/// Piecewise-linear gain schedule: `v` interpolated over breakpoints `bp`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub bp: Vec<f32>,
    pub v: Vec<f32>,
}

impl Schedule {
    fn new(bp: &[f32], v: &[f32]) -> Self {
        Self {
            bp: bp.to_vec(),
            v: v.to_vec(),
        }
    }

    /// Linear interpolation holding the end values outside the breakpoints.
    pub fn interp(&self, x: f32) -> f32 {
        let n = self.bp.len().min(self.v.len());
        if n == 0 {
            return 0.0;
        }
        if x <= self.bp[0] {
            return self.v[0];
        }
        for i in 1..n {
            if x <= self.bp[i] {
                let (x0, x1) = (self.bp[i - 1], self.bp[i]);
                let (y0, y1) = (self.v[i - 1], self.v[i]);
                let span = x1 - x0;
                if span <= 0.0 {
                    return y1;
                }
                return y0 + (y1 - y0) * (x - x0) / span;
            }
        }
        self.v[n - 1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LateralTuning {
    Torque {
        steering_angle_deadzone_deg: f32,
        use_steering_angle: bool,
    },
    Pid {
        kp: Schedule,
        ki: Schedule,
        kf: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongitudinalTuning {
    pub kp: Schedule,
    pub ki: Schedule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleParams {
    pub car: CarVariant,
    pub dashcam_only: bool,
    pub radar_unavailable: bool,
    pub safety: SafetyConfig,
    /// Seconds between steering command and measured response
    pub steer_actuator_delay: f32,
    pub steer_limit_timer: f32,
    /// Below this speed (m/s) the EPS refuses torque
    pub min_steer_speed: f32,
    pub wheelbase: Option<f32>,
    pub center_to_front: Option<f32>,
    pub lateral: LateralTuning,
    pub longitudinal: LongitudinalTuning,
    pub stopping_control: bool,
    pub stopping_decel_rate: f32,
    pub enable_bsm: bool,
    pub hybrid_ecu: bool,
}

/// Gain schedules evaluated at one speed (m/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainsAtSpeed {
    pub speed: f32,
    pub long_kp: f32,
    pub long_ki: f32,
    /// `None` for torque lateral tuning.
    pub lat_kp: Option<f32>,
    pub lat_ki: Option<f32>,
}

impl VehicleParams {
    pub fn gains_at(&self, speed: f32) -> GainsAtSpeed {
        let (lat_kp, lat_ki) = match &self.lateral {
            LateralTuning::Pid { kp, ki, .. } => (Some(kp.interp(speed)), Some(ki.interp(speed))),
            LateralTuning::Torque { .. } => (None, None),
        };
        GainsAtSpeed {
            speed,
            long_kp: self.longitudinal.kp.interp(speed),
            long_ki: self.longitudinal.ki.interp(speed),
            lat_kp,
            lat_ki,
        }
    }
}

/// EPS firmware in `("68", "6831"]` (compared on the first four bytes)
/// allows steering all the way down to a standstill.
fn eps_allows_zero_speed(version: &[u8]) -> bool {
    let head = &version[..version.len().min(4)];
    head > b"68".as_slice() && head <= b"6831".as_slice()
}

/// Look up the parameter set for `car`.
///
/// `fingerprint` is the set of CAN addresses seen on the main bus and
/// `eps_fw` the EPS firmware versions reported during fingerprinting.
pub fn vehicle_params(car: CarVariant, fingerprint: &[u32], eps_fw: &[&[u8]]) -> VehicleParams {
    let mut safety = SafetyConfig {
        model: SafetyModel::Chrysler,
        param: 0,
    };
    match car {
        CarVariant::RamHd => safety.param |= FLAG_CHRYSLER_RAM_HD,
        CarVariant::Ram1500 => safety.param |= FLAG_CHRYSLER_RAM_DT,
        _ => {}
    }

    let mut p = VehicleParams {
        car,
        dashcam_only: car == CarVariant::RamHd,
        radar_unavailable: true,
        safety,
        steer_actuator_delay: 0.1,
        steer_limit_timer: 0.4,
        min_steer_speed: 3.8,
        wheelbase: None,
        center_to_front: None,
        lateral: LateralTuning::Torque {
            steering_angle_deadzone_deg: 0.2,
            use_steering_angle: true,
        },
        longitudinal: LongitudinalTuning {
            kp: Schedule::new(&[0.0, 6.0, 10.0, 35.0], &[0.4, 0.6, 0.5, 0.2]),
            ki: Schedule::new(&[0.0, 30.0], &[0.001, 0.001]),
        },
        stopping_control: true,
        stopping_decel_rate: 0.2,
        enable_bsm: fingerprint.contains(&BSM_ADDR),
        hybrid_ecu: HYBRID_ECU_ADDRS.iter().any(|a| fingerprint.contains(a)),
    };

    if car.is_pacifica() {
        p.min_steer_speed = 0.0;
        p.steer_actuator_delay = 0.2;
    } else if car.is_grand_cherokee() {
        p.steer_actuator_delay = 0.2;
        p.lateral = LateralTuning::Pid {
            kp: Schedule::new(&[9.0, 20.0], &[0.15, 0.30]),
            ki: Schedule::new(&[9.0, 20.0], &[0.03, 0.05]),
            kf: 0.000_06,
        };
    } else if car == CarVariant::Ram1500 {
        p.steer_actuator_delay = 0.2;
        p.wheelbase = Some(3.88);
        if eps_fw.iter().any(|fw| eps_allows_zero_speed(fw)) {
            p.min_steer_speed = 0.0;
        }
    } else if car == CarVariant::RamHd {
        p.steer_actuator_delay = 0.2;
        p.lateral = LateralTuning::Torque {
            steering_angle_deadzone_deg: 1.0,
            use_steering_angle: false,
        };
    }

    p.center_to_front = p.wheelbase.map(|wb| wb * 0.44);
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eps_firmware_window() {
        assert!(eps_allows_zero_speed(b"68312176AE"));
        assert!(eps_allows_zero_speed(b"6829"));
        assert!(!eps_allows_zero_speed(b"68"));
        assert!(!eps_allows_zero_speed(b"6832"));
        assert!(!eps_allows_zero_speed(b"5831"));
    }

    #[test]
    fn schedule_holds_ends_and_interpolates() {
        let s = Schedule::new(&[0.0, 10.0], &[1.0, 3.0]);
        assert_eq!(s.interp(-5.0), 1.0);
        assert_eq!(s.interp(20.0), 3.0);
        assert!((s.interp(5.0) - 2.0).abs() < 1e-6);
    }
}
