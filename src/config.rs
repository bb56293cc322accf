//! Handler configuration loaded from `handler.toml`
//!
//! Every section is optional. A missing file section falls back to the same
//! defaults as `HandlerConfig::default()`.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HandlerConfig {
    #[serde(default)]
    pub handler: HandlerSection,
    #[serde(default)]
    pub host: HostSection,
}

/// Handler section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandlerSection {
    /// Handler identifier (must match [a-zA-Z0-9._-]+)
    #[serde(default = "default_handler_id")]
    pub id: String,
    /// Which JSON types `addNumber` may arrive as
    #[serde(default)]
    pub number_policy: NumberPolicy,
}

impl Default for HandlerSection {
    fn default() -> Self {
        Self {
            id: default_handler_id(),
            number_policy: NumberPolicy::default(),
        }
    }
}

/// Accepted JSON representations of the numeric parameter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    /// Only decimal strings such as `"2.5"`
    #[default]
    StringOnly,
    /// Decimal strings plus finite, non-negative JSON numbers
    AllowNative,
}

/// Local host services section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostSection {
    /// Root directory for file reads
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// Maximum file size returned by file reads, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Client address reported to handlers
    pub client_ip: Option<String>,
}

impl Default for HostSection {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_file_size: default_max_file_size(),
            client_ip: None,
        }
    }
}

fn default_handler_id() -> String {
    "add-number".to_string()
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_file_size() -> u64 {
    1024 * 1024 // 1MB
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid handler ID format: {0}")]
    InvalidHandlerId(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HandlerConfig {
    /// Load and validate configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HandlerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_handler_id(&self.handler.id)?;

        if self.host.max_file_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "host.max_file_size must be greater than zero".to_string(),
            ));
        }

        if let Some(ip) = &self.host.client_ip {
            ip.parse::<IpAddr>().map_err(|_| {
                ConfigError::InvalidConfig(format!("host.client_ip '{ip}' is not an IP address"))
            })?;
        }

        Ok(())
    }
}

fn validate_handler_id(handler_id: &str) -> Result<(), ConfigError> {
    let valid_chars = handler_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

    if handler_id.is_empty() || !valid_chars {
        return Err(ConfigError::InvalidHandlerId(format!(
            "Handler ID '{handler_id}' must match pattern [a-zA-Z0-9._-]+"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[handler]
id = "add-number"
number_policy = "allow_native"

[host]
base_dir = "/srv/scripts"
max_file_size = 2048
client_ip = "10.0.0.7"
"#;

        let config = HandlerConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.handler.id, "add-number");
        assert_eq!(config.handler.number_policy, NumberPolicy::AllowNative);
        assert_eq!(config.host.base_dir, PathBuf::from("/srv/scripts"));
        assert_eq!(config.host.max_file_size, 2048);
        assert_eq!(config.host.client_ip.as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = HandlerConfig::from_toml_str("").unwrap();
        assert_eq!(config, HandlerConfig::default());
        assert_eq!(config.handler.number_policy, NumberPolicy::StringOnly);
        assert_eq!(config.host.max_file_size, 1024 * 1024);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(HandlerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_handler_id() {
        assert!(validate_handler_id("invalid@handler").is_err());
        assert!(validate_handler_id("").is_err());
        assert!(validate_handler_id("valid-handler_1.0").is_ok());
    }

    #[test]
    fn test_unknown_number_policy_is_rejected() {
        let result = HandlerConfig::from_toml_str("[handler]\nnumber_policy = \"lenient\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_zero_max_file_size_is_rejected() {
        let result = HandlerConfig::from_toml_str("[host]\nmax_file_size = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_client_ip_is_rejected() {
        let result = HandlerConfig::from_toml_str("[host]\nclient_ip = \"localhost\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_serializes_back_to_toml() {
        let config = HandlerConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let reparsed = HandlerConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(config, reparsed);
    }
}
