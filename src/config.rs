/// Viewer configuration: defaults plus an optional JSON override file

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SPECTRAL_VIEWER_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "spectral_viewer.json";

/// What the redraw scheduler does with a request inside the cool-down window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushPolicy {
    /// Remember the request and repaint once when the window closes
    Trailing,
    /// Discard the request
    Drop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Minimum time between two canvas repaints
    pub redraw_interval_ms: u64,
    pub redraw_flush: FlushPolicy,
    /// Initial target of "Save Flag"
    pub flag_file: PathBuf,
    /// Appended to flag file names chosen without an extension
    pub flag_extension: String,
    /// Splice wavelengths used by jump correction
    pub jump_splices: Vec<f64>,
    /// Index of the segment left untouched by jump correction
    pub jump_reference: usize,
    /// Display name given to collections read from a directory
    pub collection_name: String,
    /// Y axis label given to collections read from a directory
    pub measure_type: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: 500,
            redraw_flush: FlushPolicy::Trailing,
            flag_file: PathBuf::from("flagged_spectra.txt"),
            flag_extension: "txt".to_string(),
            jump_splices: vec![1000.0, 1800.0],
            jump_reference: 1,
            collection_name: "collection".to_string(),
            measure_type: "pct_reflect".to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    /// Parse a configuration from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig =
            serde_json::from_str(json).map_err(|e| ViewerError::Config(e.to_string()))?;
        if config.flag_extension.trim_start_matches('.').is_empty() {
            return Err(ViewerError::Config("flag_extension must not be empty".into()));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Resolve the configuration for this process.
    ///
    /// Uses `$SPECTRAL_VIEWER_CONFIG` if set, otherwise `spectral_viewer.json`
    /// in the working directory if it exists. Any failure falls back to defaults.
    pub fn load_or_default() -> Self {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(p) => PathBuf::from(p),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Self::default();
                }
                p
            }
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
