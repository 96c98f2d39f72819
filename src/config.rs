use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub payload: PayloadSettings,
    pub collection: CollectionSettings,
    pub scheduling: SchedulingSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub notifications: NotificationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Connection to the platform CMS REST API (the record store)
#[derive(Debug, Clone, Deserialize)]
pub struct PayloadSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub veterinarians: String,
    pub bookings: String,
    pub dogs: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingSettings {
    /// Booking granularity; 30 minutes unless overridden
    pub slot_size_minutes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub search_radius_km: Option<f64>,
    pub min_score: Option<u8>,
    pub default_limit: Option<u8>,
    pub max_limit: Option<u8>,
    pub candidate_fetch_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_size_weight")]
    pub size: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_activity_weight")]
    pub activity: f64,
    #[serde(default = "default_temperament_weight")]
    pub temperament: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            size: default_size_weight(),
            age: default_age_weight(),
            activity: default_activity_weight(),
            temperament: default_temperament_weight(),
            distance: default_distance_weight(),
            gender: default_gender_weight(),
        }
    }
}

fn default_size_weight() -> f64 { 20.0 }
fn default_age_weight() -> f64 { 15.0 }
fn default_activity_weight() -> f64 { 20.0 }
fn default_temperament_weight() -> f64 { 20.0 }
fn default_distance_weight() -> f64 { 15.0 }
fn default_gender_weight() -> f64 { 10.0 }

/// Where triage emergency alerts go
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    pub webhook_url: Option<String>,
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with TINDOG__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with TINDOG__)
            // e.g., TINDOG__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TINDOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TINDOG")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the deployment platform's plain env vars on top of the layered
/// config (PAYLOAD_API_URL / PAYLOAD_API_KEY are what the hosting setup
/// injects, without the TINDOG__ prefix).
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let payload_endpoint = env::var("PAYLOAD_API_URL")
        .or_else(|_| env::var("TINDOG__PAYLOAD__ENDPOINT"))
        .ok();
    let payload_api_key = env::var("PAYLOAD_API_KEY")
        .or_else(|_| env::var("TINDOG__PAYLOAD__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = payload_endpoint {
        builder = builder.set_override("payload.endpoint", endpoint)?;
    }
    if let Some(api_key) = payload_api_key {
        builder = builder.set_override("payload.api_key", api_key)?;
    }

    builder.build()
}
