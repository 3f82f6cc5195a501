use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub kpi: KpiPlaceholders,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreSettings {
    /// JSON file with trains, positions and schedule count to load at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

/// KPI figures that have no formula yet and are reported as configured.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct KpiPlaceholders {
    #[serde(default = "default_avg_delay_minutes")]
    pub avg_delay_minutes: f64,
    #[serde(default = "default_congestion_index")]
    pub congestion_index: f64,
    #[serde(default = "default_on_time_percentage")]
    pub on_time_percentage: f64,
}

impl Default for KpiPlaceholders {
    fn default() -> Self {
        Self {
            avg_delay_minutes: default_avg_delay_minutes(),
            congestion_index: default_congestion_index(),
            on_time_percentage: default_on_time_percentage(),
        }
    }
}

fn default_app_name() -> String {
    "RailAnukriti".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api/reports".to_string()
}

fn default_avg_delay_minutes() -> f64 {
    3.5
}

fn default_congestion_index() -> f64 {
    0.42
}

fn default_on_time_percentage() -> f64 {
    92.1
}

/// Load `config/reporting` (optional) overridden by `RAIL__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/reporting").required(false))
        .add_source(
            config::Environment::with_prefix("RAIL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
