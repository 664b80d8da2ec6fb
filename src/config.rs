//! Configuration for fixture generation
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (loomicode.toml)
//! - Environment variables (LOOMICODE__*)
//!
//! ## Example config file (loomicode.toml):
//! ```toml
//! [defaults]
//! separator = ";"
//! comment_prefix = "#"
//! version = "15.1"
//!
//! [weave]
//! amount = 25
//! seed = 42
//! ```
//!
//! Nothing in the render path reads configuration on its own; callers load
//! [`LoomSettings`] once and turn it into options.

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::generators::{TableOptions, DEFAULT_COMMENT_PREFIX, DEFAULT_SEPARATOR, DEFAULT_VERSION};
use crate::weave::{WeaveOptions, DEFAULT_AMOUNT};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoomSettings {
    /// Default generator options
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Weave defaults
    #[serde(default)]
    pub weave: WeaveConfig,
}

/// Options applied when a caller does not pick its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,

    /// Unicode version to generate for
    #[serde(default = "default_version")]
    pub version: String,
}

/// Weave configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaveConfig {
    /// Items added per weave
    #[serde(default = "default_amount")]
    pub amount: usize,

    /// Fixed seed for reproducible fixtures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

// Default value functions
fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_comment_prefix() -> String {
    DEFAULT_COMMENT_PREFIX.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_amount() -> usize {
    DEFAULT_AMOUNT
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            comment_prefix: default_comment_prefix(),
            version: default_version(),
        }
    }
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            seed: None,
        }
    }
}

impl LoomSettings {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering a specific file over the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "loomicode.toml",
            ".loomicode.toml",
            "config/loomicode.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "mojis", "loomicode") {
            let xdg_config = config_dir.config_dir().join("loomicode.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (LOOMICODE__*)
        builder = builder.add_source(
            Environment::with_prefix("LOOMICODE")
                .prefix_separator("__")
                .separator("__"),
        );

        let config = builder.build()?;
        let settings: Self = config.try_deserialize()?;

        tracing::debug!(
            version = %settings.defaults.version,
            weave_amount = settings.weave.amount,
            "loaded loomicode settings"
        );

        Ok(settings)
    }

    /// Generator options built from the configured defaults
    pub fn table_options(&self) -> TableOptions {
        TableOptions::new(self.defaults.version.clone())
            .with_separator(self.defaults.separator.clone())
            .with_comment_prefix(self.defaults.comment_prefix.clone())
    }

    /// Weave options built from the configured defaults
    pub fn weave_options<T>(&self) -> WeaveOptions<T> {
        let options = WeaveOptions::new(self.weave.amount);
        match self.weave.seed {
            Some(seed) => options.seed(seed),
            None => options,
        }
    }
}
