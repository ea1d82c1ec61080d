mod cli;
mod error_fmt;
mod logging;
mod params;
mod replay;
mod self_check;

use clap::Parser;
use cli::{Cli, Commands, JSON_MODE};
use cruise_core::error::CruiseError;
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use eyre::WrapErr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

/// Read, parse and validate the TOML config; stock values when no path is given.
fn load_config(path: Option<&Path>) -> eyre::Result<cruise_config::Config> {
    let Some(path) = path else {
        return Ok(cruise_config::Config::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        eyre::Report::new(CruiseError::Io(format!("read config {}: {e}", path.display())))
    })?;
    let cfg: cruise_config::Config = toml::from_str(&text)
        .map_err(|e| eyre::Report::new(CruiseError::Config(e.message().to_string())))?;
    cfg.validate()
        .map_err(|e| eyre::Report::new(CruiseError::Config(format!("{e:#}"))))?;
    Ok(cfg)
}

fn run(cli: Cli) -> eyre::Result<()> {
    color_eyre::install()?;
    let cfg = load_config(cli.config.as_deref())?;
    logging::init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    match cli.cmd {
        Commands::Replay {
            inputs,
            paced,
            stats,
        } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = Arc::clone(&shutdown);
            ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
                .wrap_err("install Ctrl-C handler")?;
            replay::run_replay(&cfg, &inputs, paced, stats, cli.json, &shutdown)
        }
        Commands::Params {
            car,
            fingerprint,
            eps_fw,
            at_speed,
        } => params::run_params(
            &cfg,
            car.as_deref(),
            &fingerprint,
            &eps_fw,
            at_speed,
            cli.json,
        ),
        Commands::SelfCheck => self_check::run_self_check(&cfg, cli.json),
    }
}
