//! Loader configuration types
//!
//! This module defines the minimal configuration needed to read a dataset.
//! Report selection and rendering options belong to the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for reading a transaction dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Field delimiter byte (default: `,`)
    #[serde(default = "default_delimiter")]
    pub delimiter: u8,

    /// Trim surrounding whitespace from headers and fields
    #[serde(default = "default_true")]
    pub trim: bool,

    /// Skip rows that fail to parse instead of aborting the load
    #[serde(default)]
    pub skip_malformed_rows: bool,
}

fn default_delimiter() -> u8 {
    b','
}

fn default_true() -> bool {
    true
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            trim: true,
            skip_malformed_rows: false,
        }
    }
}

impl LoadConfig {
    /// Create a new loader configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method: enable or disable whitespace trimming
    pub fn with_trim(mut self, enabled: bool) -> Self {
        self.trim = enabled;
        self
    }

    /// Builder method: skip malformed rows instead of failing
    pub fn with_skip_malformed_rows(mut self, enabled: bool) -> Self {
        self.skip_malformed_rows = enabled;
        self
    }
}
