//! Combiner configuration loaded from TOML.
//!
//! A default `combine.toml` is embedded at compile time; deployments can
//! point the binary at their own file to widen or narrow the matching
//! corridor.

use std::path::Path;

use serde::Deserialize;

use crate::CombineError;

const DEFAULT_CONFIG_TOML: &str = include_str!("../combine.toml");

/// Tunables for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CombineConfig {
    /// Total width of the buffer corridor around each destination road
    /// event, in meters.
    #[serde(default = "default_polygon_width_meters")]
    pub polygon_width_meters: f64,
}

const fn default_polygon_width_meters() -> f64 {
    wzdx_spatial::DEFAULT_POLYGON_WIDTH_METERS
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG_TOML).unwrap_or(Self {
            polygon_width_meters: default_polygon_width_meters(),
        })
    }
}

impl CombineConfig {
    /// Parses and validates a TOML configuration string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the corridor width is
    /// not a finite, positive number.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, CombineError> {
        let config: Self = toml::de::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`CombineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, CombineError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("Loaded combine config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Returns a copy with the corridor width replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `meters` is not a finite, positive number.
    pub fn with_polygon_width_meters(self, meters: f64) -> Result<Self, CombineError> {
        let config = Self {
            polygon_width_meters: meters,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CombineError> {
        let width = self.polygon_width_meters;
        if !width.is_finite() || width <= 0.0 {
            return Err(CombineError::InvalidConfig {
                message: format!("polygon_width_meters must be a positive number, got {width}"),
            });
        }
        Ok(())
    }
}
