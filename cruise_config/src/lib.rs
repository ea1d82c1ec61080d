#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and tick-script parsing for the cruise shaping layer.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//!   Every section is optional; missing values fall back to the stock
//!   constants of the cruise layer.
//! - Tick scripts are CSV files with one row per control tick, used to
//!   replay recorded or hand-written button/pedal sequences.
//! - `vehicle` holds the static per-variant parameter table.
use serde::Deserialize;
use serde::de::Deserializer;

pub mod vehicle;

pub use vehicle::{CarVariant, VehicleParams, vehicle_params};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SetSpeedCfg {
    /// Lowest target speed the driver can select (mph)
    pub min_mph: f32,
    /// Highest target speed the driver can select (mph)
    pub max_mph: f32,
    /// Ticks a button must be held between long-press snaps
    pub long_press_ticks: u32,
    /// Step applied on the first tick of a press (mph)
    pub short_step_mph: i32,
    /// Grid the long press snaps to (mph)
    pub long_step_mph: i32,
    /// Gas-override latch is released by decrease after this many held ticks
    pub gas_release_ticks: u32,
}

impl Default for SetSpeedCfg {
    fn default() -> Self {
        Self {
            min_mph: 5.0,
            max_mph: 120.0,
            long_press_ticks: 50,
            short_step_mph: 1,
            long_step_mph: 5,
            gas_release_ticks: 200,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AccelCfg {
    /// Dead-band half width around the last accepted command (m/s^2)
    pub hyst_gap: f32,
    pub min: f32,
    pub max: f32,
    /// Low-pass factor in [0.0, 1.0]; closer to 0 smooths harder
    pub smoothing_factor: f32,
}

impl Default for AccelCfg {
    fn default() -> Self {
        Self {
            hyst_gap: 0.0,
            min: -3.8,
            max: 2.0,
            smoothing_factor: 0.4,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChimeCfg {
    /// Length of one tone pulse in ticks
    pub chime_ticks: u32,
    /// Silent gap before the second disengage pulse in ticks (0 disables it)
    pub gap_ticks: u32,
}

impl Default for ChimeCfg {
    fn default() -> Self {
        Self {
            chime_ticks: 8,
            gap_ticks: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FollowCfg {
    /// Follow-distance bar count at session start (1..=4)
    pub initial: u8,
}

impl Default for FollowCfg {
    fn default() -> Self {
        Self { initial: 3 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RunnerCfg {
    /// Control loop rate used when pacing a replay
    pub tick_rate_hz: u32,
}

impl Default for RunnerCfg {
    fn default() -> Self {
        Self { tick_rate_hz: 100 }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct VehicleCfg {
    /// Platform variant, e.g. "CHRYSLER_PACIFICA_2020"
    pub car: Option<CarVariant>,
    /// CAN addresses seen on bus 0 during fingerprinting
    pub fingerprint: Vec<u32>,
    /// EPS firmware versions reported by the vehicle
    pub eps_fw: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub set_speed: SetSpeedCfg,
    pub accel: AccelCfg,
    pub chime: ChimeCfg,
    pub follow: FollowCfg,
    pub runner: RunnerCfg,
    pub logging: Logging,
    pub vehicle: VehicleCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Set speed
        let ss = &self.set_speed;
        if !ss.min_mph.is_finite() || !ss.max_mph.is_finite() {
            eyre::bail!("set_speed.min_mph and set_speed.max_mph must be finite");
        }
        if ss.min_mph <= 0.0 {
            eyre::bail!("set_speed.min_mph must be > 0");
        }
        if ss.max_mph < ss.min_mph {
            eyre::bail!("set_speed.max_mph must be >= set_speed.min_mph");
        }
        if ss.long_press_ticks == 0 {
            eyre::bail!("set_speed.long_press_ticks must be >= 1");
        }
        if ss.short_step_mph < 1 {
            eyre::bail!("set_speed.short_step_mph must be >= 1");
        }
        if ss.long_step_mph < 1 {
            eyre::bail!("set_speed.long_step_mph must be >= 1");
        }

        // Accel
        let a = &self.accel;
        if !(a.min.is_finite() && a.max.is_finite()) || a.min > a.max {
            eyre::bail!("accel.min must be <= accel.max");
        }
        if a.hyst_gap.is_nan() || a.hyst_gap < 0.0 {
            eyre::bail!("accel.hyst_gap must be >= 0.0");
        }
        if !(0.0..=1.0).contains(&a.smoothing_factor) {
            eyre::bail!("accel.smoothing_factor must be in [0.0, 1.0]");
        }

        // Chime
        if self.chime.chime_ticks == 0 {
            eyre::bail!("chime.chime_ticks must be >= 1");
        }

        // Follow distance
        if !(1..=4).contains(&self.follow.initial) {
            eyre::bail!("follow.initial must be in [1, 4]");
        }

        // Runner
        if self.runner.tick_rate_hz == 0 {
            eyre::bail!("runner.tick_rate_hz must be > 0");
        }
        if self.runner.tick_rate_hz > 10_000 {
            eyre::bail!("runner.tick_rate_hz is unreasonably large (>10 kHz)");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

/// One control tick of a replay script.
///
/// Required headers:
/// acc_enabled,acc_available,setplus,setminus,resbut,vego_mph,gas,has_lead,dist_dec,dist_inc,mute,accel
///
/// Optional headers:
/// - `set_speed_mph`: current target; when absent or empty the replay feeds
///   back the previous tick's output.
/// - `acc_enabled_prev`: when absent or empty, taken from the previous row.
///
/// Flags accept `0/1` or `true/false`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct TickRow {
    #[serde(deserialize_with = "de_flag")]
    pub acc_enabled: bool,
    #[serde(deserialize_with = "de_flag")]
    pub acc_available: bool,
    #[serde(deserialize_with = "de_flag")]
    pub setplus: bool,
    #[serde(deserialize_with = "de_flag")]
    pub setminus: bool,
    #[serde(deserialize_with = "de_flag")]
    pub resbut: bool,
    pub vego_mph: f32,
    #[serde(deserialize_with = "de_flag")]
    pub gas: bool,
    #[serde(deserialize_with = "de_flag")]
    pub has_lead: bool,
    #[serde(deserialize_with = "de_flag")]
    pub dist_dec: bool,
    #[serde(deserialize_with = "de_flag")]
    pub dist_inc: bool,
    #[serde(deserialize_with = "de_flag")]
    pub mute: bool,
    /// Raw acceleration request from the planner (m/s^2)
    pub accel: f32,
    #[serde(default)]
    pub set_speed_mph: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub acc_enabled_prev: Option<bool>,
}

pub const TICK_REQUIRED_HEADERS: [&str; 12] = [
    "acc_enabled",
    "acc_available",
    "setplus",
    "setminus",
    "resbut",
    "vego_mph",
    "gas",
    "has_lead",
    "dist_dec",
    "dist_inc",
    "mute",
    "accel",
];

pub const TICK_OPTIONAL_HEADERS: [&str; 2] = ["set_speed_mph", "acc_enabled_prev"];

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim() {
        "1" | "true" | "TRUE" | "True" => Some(true),
        "0" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_flag(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid flag {s:?}")))
}

fn de_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_flag(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid flag {s:?}"))),
    }
}

/// Parse a tick script from any reader. Headers are checked before any row
/// is decoded so a typo fails fast with the offending column name.
pub fn parse_tick_script<R: std::io::Read>(reader: R) -> eyre::Result<Vec<TickRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read tick script headers: {}", e))?
        .clone();
    for h in &headers {
        if !TICK_REQUIRED_HEADERS.contains(&h) && !TICK_OPTIONAL_HEADERS.contains(&h) {
            eyre::bail!("tick script has unknown column {h:?}");
        }
    }
    let missing: Vec<&str> = TICK_REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|req| !headers.iter().any(|h| h == *req))
        .collect();
    if !missing.is_empty() {
        eyre::bail!("tick script is missing columns: {}", missing.join(","));
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<TickRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid tick script row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("tick script contains no rows");
    }
    Ok(rows)
}

pub fn load_tick_script_csv(path: &std::path::Path) -> eyre::Result<Vec<TickRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open tick script {:?}: {}", path, e))?;
    parse_tick_script(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_stock_defaults() {
        let cfg = load_toml("").unwrap();
        assert_eq!(cfg.set_speed.long_press_ticks, 50);
        assert_eq!(cfg.set_speed.long_step_mph, 5);
        assert_eq!(cfg.chime.chime_ticks, 8);
        assert_eq!(cfg.chime.gap_ticks, 5);
        assert!((cfg.accel.smoothing_factor - 0.4).abs() < f32::EPSILON);
        assert_eq!(cfg.runner.tick_rate_hz, 100);
        cfg.validate().unwrap();
    }

    #[test]
    fn flag_parsing_accepts_numeric_and_words() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }
}
