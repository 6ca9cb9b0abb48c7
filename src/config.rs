use crate::database::{ConnectionOptions, DatabaseRegistry};
use anyhow::{anyhow, Result};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
pub struct SchemataConfig {
    /// Directory holding one `<name>.db` file per database
    pub data_dir: String,

    /// How long to wait on a locked database file, in milliseconds (default: 5000)
    pub busy_timeout_ms: u64,
}

const EMPTY_CONFIG: &str = r#"### schemata configuration file

### directory holding the database files (one <name>.db per database)
# data_dir = "~/.schemata/databases"

### how long to wait on a locked database file (in milliseconds)
# busy_timeout_ms = 5000
"#;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

fn home_dir_string() -> Result<String> {
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .to_str()
        .ok_or_else(|| anyhow!("Could not convert home directory path to string"))
        .map(|s| s.to_owned())
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &str) -> Result<String> {
    if path == "~" {
        return home_dir_string();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(format!("{}/{}", home_dir_string()?, rest)),
        None => Ok(path.to_string()),
    }
}

impl Default for SchemataConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.schemata/databases", home_dir),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl SchemataConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<SchemataConfig> {
        let mut builder = Config::builder();

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                // By default use $HOME/.schemata/schemata.toml as the configuration file path
                let schemata_dir = format!("{}/.schemata", home_dir_string()?);
                crate::database::ensure_data_dir(schemata_dir.as_str())?;
                let p = format!("{}/schemata.toml", schemata_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of SCHEMATA)
        // E.g., `SCHEMATA_DATA_DIR=/srv/dbs ./schemata db list` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("SCHEMATA"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_map(&config)
    }

    /// Build a configuration from already-resolved key/value settings
    fn from_map(config: &HashMap<String, String>) -> Result<SchemataConfig> {
        let defaults = SchemataConfig::default();

        let data_dir = match config.get("data_dir") {
            Some(p) => expand_home(p)?,
            None => defaults.data_dir,
        };

        let busy_timeout_ms = match config.get("busy_timeout_ms") {
            Some(s) => s
                .parse()
                .map_err(|e| anyhow!("Invalid busy_timeout_ms '{}': {}", s, e))?,
            None => defaults.busy_timeout_ms,
        };

        Ok(SchemataConfig {
            data_dir,
            busy_timeout_ms,
        })
    }

    /// Replace the data directory (e.g. from a command-line override)
    pub fn with_data_dir(mut self, data_dir: &str) -> Result<Self> {
        self.data_dir = expand_home(data_dir)?;
        Ok(self)
    }

    /// Get busy timeout as Duration
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Connection options derived from this configuration
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            busy_timeout: self.busy_timeout(),
        }
    }

    /// Registry over the configured data directory
    pub fn registry(&self) -> DatabaseRegistry {
        DatabaseRegistry::new(self.data_dir.trim_end_matches('/'))
            .with_options(self.connection_options())
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Config File:        {}", Self::config_file_path()),
            format!("Data Directory:     {}", self.data_dir),
            format!("Busy Timeout:       {} ms", self.busy_timeout_ms),
        ];

        if !Path::new(&self.data_dir).exists() {
            lines.push("Data directory does not exist yet; it is created on first use".to_string());
        }

        lines.join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.schemata/schemata.toml", home_dir)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
