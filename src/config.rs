use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct KitchenConfig {
    /// Base URL of the recipe API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// How long the error banner stays visible, in seconds
    #[serde(default = "default_error_banner_secs")]
    pub error_banner_secs: u64,
    /// Image fallback sources
    #[serde(default)]
    pub images: ImageConfig,
}

/// Sources tried, in order, after the recipe's own image fails to load
#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Prompt-based generator; `{query}` is replaced by the dish name
    #[serde(default = "default_generated_image")]
    pub generated: String,
    /// Keyword photo service; `{query}` is replaced by the dish name
    #[serde(default = "default_fallback_image")]
    pub fallback: String,
    /// Fixed placeholder. Empty means the built-in inline image.
    #[serde(default)]
    pub placeholder: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            generated: default_generated_image(),
            fallback: default_fallback_image(),
            placeholder: String::new(),
        }
    }
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            error_banner_secs: default_error_banner_secs(),
            images: ImageConfig::default(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_error_banner_secs() -> u64 {
    5
}

fn default_generated_image() -> String {
    "https://image.pollinations.ai/prompt/professional food photography of {query}?width=800&height=600&nologo=true"
        .to_string()
}

fn default_fallback_image() -> String {
    "https://loremflickr.com/800/600/food,{query}".to_string()
}

impl KitchenConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with KITCHEN__ prefix
    /// 2. kitchen.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: KITCHEN__BASE_URL, KITCHEN__IMAGES__PLACEHOLDER
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn error_banner_duration(&self) -> Duration {
        Duration::from_secs(self.error_banner_secs)
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<KitchenConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("kitchen").required(false))
        // Use double underscore for nested: KITCHEN__IMAGES__FALLBACK
        .add_source(
            Environment::with_prefix("KITCHEN")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
