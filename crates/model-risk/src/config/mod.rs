use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::registry::scoring::config::{ScoringConfig, ScoringConfigError};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    /// Optional path to a scoring configuration JSON; the built-in v1.0
    /// table is used when absent.
    pub scoring_config_path: Option<PathBuf>,
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

        let scoring_config_path = env::var("MODEL_RISK_SCORING_CONFIG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring_config_path,
        })
    }

    /// Resolve the scoring configuration: a validated file when a path is
    /// configured, the built-in v1.0 table otherwise.
    pub fn scoring_config(&self) -> Result<ScoringConfig, ConfigError> {
        match &self.scoring_config_path {
            Some(path) => {
                let raw = std::fs::read(path).map_err(|source| ConfigError::ScoringConfigRead {
                    path: path.clone(),
                    source,
                })?;
                let config: ScoringConfig = serde_json::from_slice(&raw).map_err(|source| {
                    ConfigError::ScoringConfigParse {
                        path: path.clone(),
                        source,
                    }
                })?;
                config
                    .validate()
                    .map_err(ConfigError::ScoringConfigInvalid)?;
                Ok(config)
            }
            None => Ok(ScoringConfig::builtin()),
        }
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    ScoringConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    ScoringConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    ScoringConfigInvalid(ScoringConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::ScoringConfigRead { path, .. } => {
                write!(f, "unable to read scoring config at {}", path.display())
            }
            ConfigError::ScoringConfigParse { path, .. } => {
                write!(f, "scoring config at {} is not valid JSON", path.display())
            }
            ConfigError::ScoringConfigInvalid(err) => {
                write!(f, "scoring config rejected: {err}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::ScoringConfigRead { source, .. } => Some(source),
            ConfigError::ScoringConfigParse { source, .. } => Some(source),
            ConfigError::ScoringConfigInvalid(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_labels_map_to_variants() {
        assert_eq!(
            AppEnvironment::from_str("Production"),
            AppEnvironment::Production
        );
        assert_eq!(AppEnvironment::from_str("ci"), AppEnvironment::Test);
        assert_eq!(
            AppEnvironment::from_str("anything-else"),
            AppEnvironment::Development
        );
    }

    #[test]
    fn localhost_resolves_to_loopback() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 8080,
        };
        let addr = config.socket_addr().expect("socket addr");
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn missing_path_falls_back_to_builtin_table() {
        let config = AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            scoring_config_path: None,
        };

        let scoring = config.scoring_config().expect("builtin scoring config");
        assert_eq!(scoring.scoring_version, "1.0");
    }
}
