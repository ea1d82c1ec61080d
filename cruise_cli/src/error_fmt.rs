//! Human-readable error descriptions and structured JSON error formatting.

use cruise_config::CarVariant;
use cruise_core::error::{BuildError, CruiseError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(BuildError::InvalidConfig(msg)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid cruise parameters ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    if let Some(ce) = err.downcast_ref::<CruiseError>() {
        return match ce {
            CruiseError::Config(msg) => format!(
                "What happened: Configuration is invalid ({msg}).\nLikely causes: A typo in a section or key, or a value outside its allowed range.\nHow to fix: Edit the TOML config and try again; omit --config to run with stock parameters."
            ),
            CruiseError::Script(msg) => format!(
                "What happened: The tick script could not be loaded ({msg}).\nLikely causes: Missing or misspelled header columns, or a non-numeric / non-boolean cell.\nHow to fix: Check the CSV header against the documented columns and fix the reported row."
            ),
            CruiseError::Io(msg) => format!(
                "What happened: A file could not be read ({msg}).\nLikely causes: Wrong path or missing permissions.\nHow to fix: Check the path and rerun."
            ),
            CruiseError::Interrupted { completed } => format!(
                "What happened: Replay was interrupted after {completed} ticks.\nLikely causes: Ctrl-C or a termination signal.\nHow to fix: Rerun the replay if the full output is needed."
            ),
        };
    }

    // String-based heuristics for errors coming from init
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("unsupported car") {
        let names: Vec<&str> = CarVariant::ALL.iter().map(|c| c.name()).collect();
        return format!(
            "What happened: {msg}.\nHow to fix: Use one of: {}.",
            names.join(", ")
        );
    }

    if lower.contains("log level") || lower.contains("logging.level") {
        return format!(
            "What happened: {msg}.\nHow to fix: Use one of error|warn|info|debug|trace, or a RUST_LOG style directive."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 config, 4 interrupted, 5 tick script, 1 anything else.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 3;
    }
    match err.downcast_ref::<CruiseError>() {
        Some(CruiseError::Config(_)) => 3,
        Some(CruiseError::Interrupted { .. }) => 4,
        Some(CruiseError::Script(_)) => 5,
        Some(CruiseError::Io(_)) | None => 1,
    }
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if err.downcast_ref::<BuildError>().is_some() {
        return "InvalidConfig";
    }
    match err.downcast_ref::<CruiseError>() {
        Some(CruiseError::Config(_)) => "InvalidConfig",
        Some(CruiseError::Script(_)) => "TickScript",
        Some(CruiseError::Io(_)) => "Io",
        Some(CruiseError::Interrupted { .. }) => "Interrupted",
        None => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let msg = humanize(err);
    if let Some(CruiseError::Interrupted { completed }) = err.downcast_ref::<CruiseError>() {
        return json!({
            "reason": reason_name(err),
            "details": { "completed_ticks": completed },
            "message": msg,
        })
        .to_string();
    }
    json!({ "reason": reason_name(err), "message": msg }).to_string()
}
