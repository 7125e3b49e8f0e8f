use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Base path of TheMealDB v1 public API
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Runtime settings for the finder
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// API base path, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of random recipes loaded on start and on empty submit
    #[serde(default = "default_random_batch_size")]
    pub random_batch_size: usize,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            random_batch_size: default_random_batch_size(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_random_batch_size() -> usize {
    6
}

fn default_user_agent() -> String {
    format!("recipe-finder/{}", env!("CARGO_PKG_VERSION"))
}

impl Settings {
    /// Load settings from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("recipe-finder").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_FINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
