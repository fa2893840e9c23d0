use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub entity: EntityConfig,
}

/// Paths of the two source exports.
#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    /// Collections API agent export (the catalog side)
    #[serde(default = "default_catalog_input")]
    pub catalog: PathBuf,
    /// Collections management system parties export (the registry side)
    #[serde(default = "default_registry_input")]
    pub registry: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Where the combined import table is written
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Directory for timestamped JSON run reports
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityConfig {
    /// Canonical entity page URL; `{}` is replaced with the record key
    #[serde(default = "default_url_template")]
    pub url_template: String,
}

fn default_catalog_input() -> PathBuf {
    PathBuf::from("apiagentexport.csv")
}

fn default_registry_input() -> PathBuf {
    PathBuf::from("emupartiesexport.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("agents-mixnmatch.csv")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_url_template() -> String {
    "https://collections.tepapa.govt.nz/agent/{}".to_string()
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog_input(),
            registry: default_registry_input(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            report_dir: default_report_dir(),
        }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `config.toml` from the working directory if it exists, built-in
    /// defaults otherwise. Command-line flags override either.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new("config.toml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
