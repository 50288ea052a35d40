//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stride_cart::config::default_storage_key;
use stride_cart::{CartConfig, NotificationMessages};
use stride_observability::LogConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the cart is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LogConfig,

    /// Shopper-facing messages.
    #[serde(default)]
    pub messages: NotificationMessages,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Settings for the cart manager.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig {
            storage_key: self.storage.key.clone(),
            messages: self.messages.clone(),
        }
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file, relative to the working directory unless absolute.
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_path() -> String {
    ".stride/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// Generate a default stride.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Stride cart configuration

[api]
base_url = "{base_url}"
timeout_secs = {timeout}

[storage]
path = "{path}"
key = "{key}"

[logging]
level = "warn"
format = "human"
# directives = "stride_data=debug"

[messages]
# add_failed = "Error adding product"
# remove_failed = "Error removing product"
# update_failed = "Error changing product quantity"
# out_of_stock = "Requested quantity is out of stock"
# cart_unreadable = "Your saved cart could not be read and was reset"
"#,
        base_url = default_base_url(),
        timeout = default_timeout_secs(),
        path = default_storage_path(),
        key = default_storage_key(),
    )
}
