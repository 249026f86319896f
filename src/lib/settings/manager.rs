use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::*;

use crate::{
    error::{Error, Result},
    link::DEFAULT_BAUD_RATE,
    metrics::registry::{default_metric_names, DEFAULT_CAPACITY},
};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SettingsStruct {
    /// Samples kept per metric.
    pub capacity: usize,
    pub baud_rate: u32,
    /// Provisioned metrics, in display order.
    pub metric_names: Vec<String>,
}

impl Default for SettingsStruct {
    fn default() -> Self {
        SettingsStruct {
            capacity: DEFAULT_CAPACITY,
            baud_rate: DEFAULT_BAUD_RATE,
            metric_names: default_metric_names(),
        }
    }
}

impl SettingsStruct {
    /// Command line values take precedence over the settings file.
    pub fn with_overrides(mut self, baud_rate: Option<u32>, capacity: Option<usize>) -> Self {
        if let Some(baud_rate) = baud_rate {
            self.baud_rate = baud_rate;
        }
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        self
    }
}

/// Loads the settings file, or the defaults when no file is given.
///
/// A file that was asked for but cannot be read or parsed is an error, the
/// pipeline would otherwise run with metrics nobody expects.
#[instrument(level = "debug")]
pub fn load(file_name: Option<&Path>) -> Result<SettingsStruct> {
    let Some(file_name) = file_name else {
        debug!("No settings file, using defaults");
        return Ok(SettingsStruct::default());
    };

    debug!("Using settings file: {file_name:?}");

    let settings_error = |reason: String| Error::Settings {
        path: file_name.display().to_string(),
        reason,
    };

    let content = std::fs::read_to_string(file_name).map_err(|error| settings_error(error.to_string()))?;
    let settings: SettingsStruct =
        serde_json::from_str(&content).map_err(|error| settings_error(error.to_string()))?;

    debug!("Loaded settings: {settings:#?}");

    Ok(settings)
}
