//! Render configuration and its validation errors.

use lux_math::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a [`RenderConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("samples_per_pixel must be at least 1")]
    InvalidSamples,

    #[error("max_depth must be at least 1")]
    InvalidDepth,

    #[error("t_min must be finite and non-negative, got {0}")]
    InvalidEpsilon(f32),

    #[error("min_throughput must be finite and non-negative, got {0}")]
    InvalidCutoff(f32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration.
///
/// Every field has a default, so a JSON document only needs the fields it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    /// Lower bound of the hit interval, keeps scattered rays off their own surface
    pub t_min: f32,
    /// Paths whose throughput drops below this are terminated; 0 disables
    pub min_throughput: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            use_sky_gradient: false,
            t_min: 0.001,
            min_throughput: 0.0,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("Loaded render config: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::InvalidSamples);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidDepth);
        }
        if !self.t_min.is_finite() || self.t_min < 0.0 {
            return Err(ConfigError::InvalidEpsilon(self.t_min));
        }
        if !self.min_throughput.is_finite() || self.min_throughput < 0.0 {
            return Err(ConfigError::InvalidCutoff(self.min_throughput));
        }
        Ok(())
    }
}
