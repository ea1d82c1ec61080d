#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Longitudinal cruise shaping (hardware-agnostic).
//!
//! Four independent per-tick components, each a pure function of explicit
//! state plus the current tick's inputs:
//!
//! - **Set speed**: button-driven target speed with short/long press, resume
//!   and gas override (`set_speed` module)
//! - **Cruise icon**: cluster cruise state, icon code and follow distance
//!   (`icon` module)
//! - **Accel shaping**: hysteresis, actuator clamp and low-pass smoothing
//!   (`accel` module)
//! - **Chime**: edge-triggered engage / disengage tones (`chime` module)
//!
//! `CruiseController` owns the state and runs all four once per tick;
//! `runner::replay` drives it over a scripted tick sequence.
//!
//! ## Units
//!
//! Speeds are m/s at every public boundary. The set-speed logic works in
//! whole display mph internally and clips the result to the configured band
//! as the last step of every tick.

pub mod accel;
pub mod builder;
pub mod chime;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod icon;
pub mod runner;
pub mod set_speed;
pub mod state;
pub mod status;
pub mod units;
pub mod util;

pub use accel::{
    AccelShaper, AccelState, accel_hysteresis, accel_rate_limit, accel_rate_limit_default,
};
pub use builder::CruiseControllerBuilder;
pub use chime::{
    ChimeController, ChimeInputs, ChimePhase, ChimeState, ChimeTone, cluster_chime,
};
pub use config::*;
pub use controller::CruiseController;
pub use error::{BuildError, CruiseError, Result};
pub use icon::{
    CruiseIconSelector, CruiseState, FollowDistance, IconInputs, IconOutput, cruise_icon_logic,
};
pub use runner::{ReplayReport, ReplayStats, ScriptTick, replay};
pub use set_speed::{
    PressPhase, SetSpeedController, SetSpeedInputs, SetSpeedState, set_speed_logic,
};
pub use state::{ControlState, TickInputs};
pub use status::TickOutputs;
