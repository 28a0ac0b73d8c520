use crate::ranking::{RankOptions, ScoringWeights, SortKey};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the ranking host.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ranking: RankingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Host-wide ranking defaults; request-level options override them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingConfig {
    pub weights: ScoringWeights,
    pub sort_by: SortKey,
}

impl RankingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = ScoringWeights::default();
        let weights = ScoringWeights {
            skill: weight_from_env("RANKING_WEIGHT_SKILL", defaults.skill)?,
            experience: weight_from_env("RANKING_WEIGHT_EXPERIENCE", defaults.experience)?,
            education: weight_from_env("RANKING_WEIGHT_EDUCATION", defaults.education)?,
            availability: weight_from_env("RANKING_WEIGHT_AVAILABILITY", defaults.availability)?,
            recency: weight_from_env("RANKING_WEIGHT_RECENCY", defaults.recency)?,
        };

        let sort_by = match env::var("RANKING_SORT_BY") {
            Ok(value) => {
                SortKey::from_name(&value).ok_or(ConfigError::InvalidSortKey { value })?
            }
            Err(_) => SortKey::default(),
        };

        Ok(Self { weights, sort_by })
    }

    pub fn rank_options(&self) -> RankOptions {
        RankOptions {
            weights: self.weights,
            sort_by: self.sort_by,
            ..RankOptions::default()
        }
    }
}

fn weight_from_env(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ConfigError::InvalidWeight { key, value: raw })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWeight { key: &'static str, value: String },
    InvalidSortKey { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWeight { key, value } => {
                write!(f, "{key} must be a finite number, got '{value}'")
            }
            ConfigError::InvalidSortKey { value } => write!(
                f,
                "RANKING_SORT_BY must be one of priority_score, skill_match, experience, recency (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidWeight { .. }
            | ConfigError::InvalidSortKey { .. } => None,
        }
    }
}
