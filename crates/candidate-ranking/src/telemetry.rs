use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidFilter { directive: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { directive, .. } => {
                write!(f, "log filter '{directive}' is not a valid EnvFilter directive")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "tracing subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidFilter { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Builds the log filter, preferring `RUST_LOG` over the configured level.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.log_level).map_err(|source| TelemetryError::InvalidFilter {
        directive: config.log_level.clone(),
        source,
    })
}

/// Installs the global fmt subscriber used by the CLI and HTTP host.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
