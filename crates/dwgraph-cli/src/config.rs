//! CLI configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DWGRAPH_CONFIG";

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dwgraph")
}

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dwgraph")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_graph: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_graph: "default".to_string(),
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults if absent or invalid
    pub fn load() -> Self {
        let path = config_file_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Write the config file, creating its directory if needed
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["data_dir", "default_graph", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(self.data_dir.display().to_string()),
            "default_graph" => Some(self.default_graph.clone()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "default_graph" => {
                dwgraph_core::limits::validate_graph_name(value)?;
                self.default_graph = value.to_string();
            }
            "format" => match value {
                "table" | "json" => self.format = value.to_string(),
                _ => anyhow::bail!("Invalid format '{}': expected table or json", value),
            },
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        config.set("default_graph", "roads").unwrap();
        config.set("format", "json").unwrap();

        assert_eq!(config.get("default_graph").as_deref(), Some("roads"));
        assert_eq!(config.get("format").as_deref(), Some("json"));
        assert!(config.get("missing").is_none());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("format", "xml").is_err());
        assert!(config.set("default_graph", "no spaces").is_err());
        assert!(config.set("color", "red").is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("default_graph = \"metro\"").unwrap();
        assert_eq!(config.default_graph, "metro");
        assert_eq!(config.format, "table");
    }
}
