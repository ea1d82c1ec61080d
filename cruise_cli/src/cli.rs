//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "cruise", version, about = "Cruise shaping CLI")]
pub struct Cli {
    /// Path to config TOML (typed); stock parameters when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a CSV tick script through the cruise controller
    Replay {
        /// Tick script (strict header, one row per tick)
        #[arg(long, value_name = "CSV")]
        inputs: PathBuf,
        /// Sleep between ticks at runner.tick_rate_hz instead of running flat out
        #[arg(long, action = ArgAction::SetTrue)]
        paced: bool,
        /// Print run statistics to stderr
        #[arg(long, action = ArgAction::SetTrue)]
        stats: bool,
    },
    /// Print the vehicle parameter table entry for a platform
    Params {
        /// Platform name, e.g. RAM_1500_5TH_GEN (falls back to [vehicle] car)
        #[arg(long, value_name = "VARIANT")]
        car: Option<String>,
        /// CAN address seen during fingerprinting (repeatable)
        #[arg(long = "fingerprint", value_name = "ADDR")]
        fingerprint: Vec<u32>,
        /// EPS firmware version (repeatable)
        #[arg(long = "eps-fw", value_name = "VERSION")]
        eps_fw: Vec<String>,
        /// Also evaluate the gain schedules at this speed (m/s)
        #[arg(long, value_name = "M/S")]
        at_speed: Option<f32>,
    },
    /// Validate the config and run a built-in engage/disengage scenario
    SelfCheck,
}
