use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub firebase: FirebaseSettings,
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseSettings {
    pub database_url: String,
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_api_url")]
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            min_score: default_min_score(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_class_weight")]
    pub class: u32,
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(rename = "type", default = "default_type_weight")]
    pub school_type: u32,
    #[serde(default = "default_distance_weight")]
    pub distance: u32,
    #[serde(default = "default_fee_weight")]
    pub fee: u32,
    #[serde(default = "default_midday_meal_weight")]
    pub midday_meal: u32,
    #[serde(default = "default_girl_child_weight")]
    pub girl_child: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            class: default_class_weight(),
            location: default_location_weight(),
            school_type: default_type_weight(),
            distance: default_distance_weight(),
            fee: default_fee_weight(),
            midday_meal: default_midday_meal_weight(),
            girl_child: default_girl_child_weight(),
        }
    }
}

fn default_class_weight() -> u32 { 30 }
fn default_location_weight() -> u32 { 20 }
fn default_type_weight() -> u32 { 20 }
fn default_distance_weight() -> u32 { 20 }
fn default_fee_weight() -> u32 { 20 }
fn default_midday_meal_weight() -> u32 { 5 }
fn default_girl_child_weight() -> u32 { 5 }
fn default_min_score() -> u32 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// School-list cache TTL; 0 disables caching.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_max_upload_bytes() -> usize { 10 * 1024 * 1024 }

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
    /// 3. Environment variables (prefixed with SHIKSHA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SHIKSHA_)
            // e.g., SHIKSHA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SHIKSHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute well-known environment variables for secrets
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SHIKSHA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Override secrets from their conventional environment variable names.
/// `FIREBASE_DATABASE_URL` and `GEMINI_API_KEY` are what the deployment
/// environment exports; the `SHIKSHA__*` forms also work.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let database_url = env::var("FIREBASE_DATABASE_URL")
        .or_else(|_| env::var("SHIKSHA_FIREBASE__DATABASE_URL"))
        .ok();
    let auth_token = env::var("FIREBASE_AUTH_TOKEN")
        .or_else(|_| env::var("SHIKSHA_FIREBASE__AUTH_TOKEN"))
        .ok();
    let api_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("SHIKSHA_GEMINI__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(database_url) = database_url {
        builder = builder.set_override("firebase.database_url", database_url)?;
    }
    if let Some(auth_token) = auth_token {
        builder = builder.set_override("firebase.auth_token", auth_token)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("gemini.api_key", api_key)?;
    }

    builder.build()
}
