//! Compression settings and their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;

/// Largest number of files accepted in one selection or drop.
pub const DEFAULT_MAX_FILES: usize = 10;
/// Default lossy quality factor.
pub const DEFAULT_QUALITY: f32 = 0.7;
/// Default output width cap in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1920;
/// Default output height cap in pixels.
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Errors raised when settings cannot be used for compression.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("Quality must be between 0.0 and 1.0, got {0}")]
    QualityOutOfRange(f32),

    #[error("Maximum dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensionCap { width: u32, height: u32 },
}

/// Settings applied to a single compression call.
///
/// This is a plain value: callers read it when they start processing an
/// image and pass it in, so a later change never affects work in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionSettings {
    /// Lossy quality factor (0.0 to 1.0)
    pub quality: f32,
    /// Output width cap in pixels
    pub max_width: u32,
    /// Output height cap in pixels
    pub max_height: u32,
    /// Resampling filter used when downscaling
    pub filter: FilterType,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            filter: FilterType::default(),
        }
    }
}

impl CompressionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with the quality taken from a 0-100 slider position.
    pub fn with_slider_value(self, value: u8) -> Self {
        Self {
            quality: f32::from(value.min(100)) / 100.0,
            ..self
        }
    }

    /// Return a copy with different output caps.
    pub fn with_max_dimensions(self, max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            ..self
        }
    }

    /// Slider position (0-100) matching the current quality.
    pub fn slider_value(&self) -> u8 {
        (self.quality.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Check that the settings can drive the encoder.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.quality.is_finite() || !(0.0..=1.0).contains(&self.quality) {
            return Err(SettingsError::QualityOutOfRange(self.quality));
        }
        if self.max_width == 0 || self.max_height == 0 {
            return Err(SettingsError::ZeroDimensionCap {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }
}
