//! Annotator configuration.

use crate::color::Rgba8;
use crate::elements::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, Font};
use crate::eraser::DEFAULT_ERASER_RADIUS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings for one annotation surface. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Solid fill painted under the background image.
    pub background_color: String,
    /// Initial stroke color for new elements.
    pub stroke_color: String,
    /// Stroke width given to every new element.
    pub stroke_width: f64,
    /// Half-width of the eraser footprint.
    pub eraser_radius: f64,
    /// Font for text labels.
    pub font: Font,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            background_color: "white".to_string(),
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            font: Font::default(),
        }
    }
}

impl AnnotatorConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: format!("surface must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if !(self.stroke_width > 0.0) {
            return Err(ConfigError::Invalid {
                field: "stroke_width",
                reason: format!("must be positive, got {}", self.stroke_width),
            });
        }
        if !(self.eraser_radius >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "eraser_radius",
                reason: format!("must not be negative, got {}", self.eraser_radius),
            });
        }
        if !(self.font.size > 0.0) {
            return Err(ConfigError::Invalid {
                field: "font.size",
                reason: format!("must be positive, got {}", self.font.size),
            });
        }
        Ok(())
    }

    pub fn background(&self) -> Rgba8 {
        Rgba8::parse(&self.background_color)
    }
}
