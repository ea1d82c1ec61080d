use thiserror::Error;

/// Typed failures surfaced by the fallible edges of the crate (config,
/// scripts, replay). The per-tick components never fail.
#[derive(Debug, Error, Clone)]
pub enum CruiseError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("tick script error: {0}")]
    Script(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("replay interrupted after {completed} ticks")]
    Interrupted { completed: usize },
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
