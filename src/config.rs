use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// JSON file holding submitted contacts (created as `[]` if absent)
    #[arg(long, env = "ITSITE_DATA_FILE", default_value = "contacts.json")]
    pub data_file: PathBuf,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    #[command(flatten)]
    pub health: HealthConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "ITSITE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the public API
    #[arg(long, env = "ITSITE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Port for liveness and readiness probes
    #[arg(long, env = "ITSITE_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight requests after a shutdown signal
    #[arg(long, env = "ITSITE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Default log filter, used when `RUST_LOG` is unset
    #[arg(long, env = "ITSITE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "ITSITE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP/HTTP collector base URL; traces and metrics are exported only when set
    #[arg(long, env = "ITSITE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness check against the contact store
    #[arg(long = "health-store-timeout-ms", env = "ITSITE_HEALTH_STORE_TIMEOUT_MS", default_value_t = 2000)]
    pub store_timeout_ms: u64,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
