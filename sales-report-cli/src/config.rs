//! Configuration loading and parsing

use crate::report::OutputFormat;
use anyhow::{bail, Context, Result};
use sales_report::LoadConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// Dataset file to load
    pub file: Option<PathBuf>,
    /// Single-character field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub skip_malformed_rows: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: None,
            delimiter: default_delimiter(),
            skip_malformed_rows: false,
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

impl InputConfig {
    /// Loader settings for the library
    pub fn load_config(&self) -> Result<LoadConfig> {
        let delimiter = match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ if self.delimiter == "\\t" => b'\t',
            _ => bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter),
        };

        Ok(LoadConfig::new()
            .with_delimiter(delimiter)
            .with_skip_malformed_rows(self.skip_malformed_rows))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Write each page into this directory instead of stdout
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: usize,
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            output_dir: None,
            max_table_rows: default_max_table_rows(),
            bar_width: default_bar_width(),
        }
    }
}

fn default_max_table_rows() -> usize {
    20
}

fn default_bar_width() -> usize {
    40
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.output.bar_width == 0 {
        bail!("output.bar_width must be at least 1");
    }

    Ok(config)
}
