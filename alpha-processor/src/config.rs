//! Processor configuration

use crate::validators::RequiredFieldsConfig;
use serde::{Deserialize, Serialize};

/// Overall processor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Shape a message must have to be processed
    #[serde(default)]
    pub schema: RequiredFieldsConfig,

    /// Diagnostics settings for the binary
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Maximum level emitted: trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Parsed level, falling back to INFO for unknown names
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> anyhow::Result<ProcessorConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProcessorConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to TOML file
pub fn save_config(config: &ProcessorConfig, path: &str) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a default configuration file template
pub fn create_config_template(path: &str) -> anyhow::Result<()> {
    let template = "# Alpha Processor Configuration

[schema]
# Keys every incoming message must carry (non-null)
required_fields = [\"symbol\", \"timestamp\", \"data\"]

# Require `symbol` to be a non-empty string and `data` an object
strict_types = true

[logging]
# trace, debug, info, warn or error
level = \"info\"
";

    std::fs::write(path, template)?;
    Ok(())
}
