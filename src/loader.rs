//! Loading configurations from YAML or JSON files.

use std::path::Path;

use tracing::debug;

use crate::config::{AircraftConfig, RawAircraftConfig};
use crate::errors::LoadError;

/// Parse and validate a YAML configuration.
///
/// # Errors
///
/// Returns [`LoadError::Yaml`] for malformed text and [`LoadError::Invalid`]
/// when the parsed values fail validation.
pub fn from_yaml_str(text: &str) -> Result<AircraftConfig, LoadError> {
    let raw: RawAircraftConfig = serde_yaml::from_str(text)?;
    Ok(AircraftConfig::new(raw)?)
}

/// Parse and validate a JSON configuration.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed text and [`LoadError::Invalid`]
/// when the parsed values fail validation.
pub fn from_json_str(text: &str) -> Result<AircraftConfig, LoadError> {
    let raw: RawAircraftConfig = serde_json::from_str(text)?;
    Ok(AircraftConfig::new(raw)?)
}

impl AircraftConfig {
    /// Load a configuration file; `.json` files are JSON, anything else YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] when the file cannot be read, otherwise the
    /// errors of [`from_json_str`] or [`from_yaml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "loading configuration");
        if is_json {
            from_json_str(&text)
        } else {
            from_yaml_str(&text)
        }
    }
}
