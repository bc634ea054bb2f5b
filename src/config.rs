use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub advisor: AdvisorSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub predictor: PredictorSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// LLM advice generator endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorSettings {
    #[serde(default = "default_advisor_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_advisor_model")]
    pub model: String,
    #[serde(default = "default_advisor_timeout")]
    pub timeout_secs: u64,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_advisor_endpoint(),
            api_key: String::new(),
            model: default_advisor_model(),
            timeout_secs: default_advisor_timeout(),
        }
    }
}

fn default_advisor_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_advisor_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_advisor_timeout() -> u64 {
    60
}

/// Geographic collaborator endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_weather_endpoint")]
    pub weather_endpoint: String,
    #[serde(default = "default_geocode_endpoint")]
    pub geocode_endpoint: String,
    #[serde(default = "default_overpass_endpoint")]
    pub overpass_endpoint: String,
    /// External geo APIs require an identifying User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_search_radius")]
    pub search_radius_m: u32,
    #[serde(default = "default_location_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_location_cache_size")]
    pub cache_size: u64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            weather_endpoint: default_weather_endpoint(),
            geocode_endpoint: default_geocode_endpoint(),
            overpass_endpoint: default_overpass_endpoint(),
            user_agent: default_user_agent(),
            search_radius_m: default_search_radius(),
            cache_ttl_secs: default_location_cache_ttl(),
            cache_size: default_location_cache_size(),
        }
    }
}

fn default_weather_endpoint() -> String {
    "https://api.met.no/weatherapi/locationforecast/2.0/compact".to_string()
}

fn default_geocode_endpoint() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_overpass_endpoint() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

fn default_user_agent() -> String {
    "FitMatchApp/1.0 (fitmatch@example.com)".to_string()
}

fn default_search_radius() -> u32 {
    2000
}

fn default_location_cache_ttl() -> u64 {
    600
}

fn default_location_cache_size() -> u64 {
    1000
}

/// Wellness model inference endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorSettings {
    #[serde(default = "default_predictor_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_predictor_timeout")]
    pub timeout_secs: u64,
}

impl Default for PredictorSettings {
    fn default() -> Self {
        Self {
            endpoint: default_predictor_endpoint(),
            timeout_secs: default_predictor_timeout(),
        }
    }
}

fn default_predictor_endpoint() -> String {
    "http://localhost:8500/predict".to_string()
}

fn default_predictor_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
    #[serde(default = "default_top_n")]
    pub default_top_n: u16,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_threshold: default_threshold(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

fn default_threshold() -> f64 {
    0.3
}

fn default_top_n() -> u16 {
    10
}

fn default_max_top_n() -> u16 {
    50
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_fitness_weight")]
    pub fitness_level: f64,
    #[serde(default = "default_energy_weight")]
    pub energy_level: f64,
    #[serde(default = "default_recovery_weight")]
    pub recovery_index: f64,
    #[serde(default = "default_readiness_weight")]
    pub readiness_score: f64,
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_intensity_weight")]
    pub intensity: f64,
    #[serde(default = "default_suggestion_weight")]
    pub suggestion_type: f64,
    #[serde(default = "default_duration_weight")]
    pub duration: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            fitness_level: default_fitness_weight(),
            energy_level: default_energy_weight(),
            recovery_index: default_recovery_weight(),
            readiness_score: default_readiness_weight(),
            interests: default_interests_weight(),
            intensity: default_intensity_weight(),
            suggestion_type: default_suggestion_weight(),
            duration: default_duration_weight(),
        }
    }
}

fn default_fitness_weight() -> f64 { 0.15 }
fn default_energy_weight() -> f64 { 0.15 }
fn default_recovery_weight() -> f64 { 0.15 }
fn default_readiness_weight() -> f64 { 0.15 }
fn default_interests_weight() -> f64 { 0.20 }
fn default_intensity_weight() -> f64 { 0.10 }
fn default_suggestion_weight() -> f64 { 0.05 }
fn default_duration_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FITMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FITMATCH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FITMATCH")
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
                Environment::with_prefix("FITMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Pull well-known secrets from plain environment variables so they
/// never have to live in a config file
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    // ADVISOR_API_KEY takes precedence over FITMATCH_ADVISOR__API_KEY
    let api_key = env::var("ADVISOR_API_KEY")
        .or_else(|_| env::var("FITMATCH_ADVISOR__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("advisor.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.fitness_level, 0.15);
        assert_eq!(weights.energy_level, 0.15);
        assert_eq!(weights.recovery_index, 0.15);
        assert_eq!(weights.readiness_score, 0.15);
        assert_eq!(weights.interests, 0.20);
        assert_eq!(weights.intensity, 0.10);
        assert_eq!(weights.suggestion_type, 0.05);
        assert_eq!(weights.duration, 0.05);
    }

    #[test]
    fn test_default_matching_settings() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_threshold, 0.3);
        assert_eq!(matching.default_top_n, 10);
        assert_eq!(matching.max_top_n, 50);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
