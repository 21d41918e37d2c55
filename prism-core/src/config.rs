//! Typed configuration for every tool.
//!
//! Each tool reads a small struct of tunables. All of them have defaults
//! matching the behavior users expect, and all of them can be overridden from
//! a JSON file:
//!
//! ```no_run
//! use prism_core::ToolsConfig;
//! use std::path::Path;
//!
//! let config = ToolsConfig::from_json_file(Path::new("prism.json"))?;
//! assert_eq!(config.extraction.canvas_size, 100);
//! # Ok::<(), prism_core::ToolError>(())
//! ```
//!
//! Missing sections and fields fall back to their defaults. Every loaded or
//! hand-built config should pass [`ToolsConfig::validate`] before use.
//!
//! # Sections
//!
//! - [`ExtractionConfig`]: histogram extraction from images
//! - [`GenerationConfig`]: golden-angle palette generation
//! - [`CompressionConfig`]: JPEG re-encoding limits
//! - [`ArrangeConfig`]: tile layout for composed images

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::palette::MAX_PALETTE_COLORS;
use crate::{Result, ToolError};

/// Largest accepted extraction canvas side
pub const MAX_CANVAS_SIZE: u32 = 1024;

/// Largest accepted compression output side
pub const MAX_OUTPUT_DIMENSION: u32 = 8192;

/// Largest accepted arrangement tile side
pub const MAX_TILE_SIZE: u32 = 4096;

/// Largest accepted arrangement padding
pub const MAX_PADDING: u32 = 1024;

/// Complete configuration for a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub extraction: ExtractionConfig,
    pub generation: GenerationConfig,
    pub compression: CompressionConfig,
    pub arrangement: ArrangeConfig,
}

/// Resampling kernel used when shrinking an image onto the sampling canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

/// Histogram extraction parameters.
///
/// The canvas size and stride are sampling approximations, not precision
/// requirements. Tune them freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Side length of the square canvas the image is drawn onto
    pub canvas_size: u32,

    /// Visit every n-th pixel of the canvas
    pub sample_stride: usize,

    /// Pixels with alpha at or below this value are ignored
    pub alpha_threshold: u8,

    /// Number of most frequent colors to keep
    pub max_colors: usize,

    /// Kernel used for downsampling
    pub filter: ResampleFilter,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            canvas_size: 100,
            sample_stride: 4,
            alpha_threshold: 128,
            max_colors: MAX_PALETTE_COLORS,
            filter: ResampleFilter::Triangle,
        }
    }
}

/// Golden-angle palette generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of colors per generated palette
    pub count: usize,

    /// Hue increment between consecutive colors, in degrees
    pub hue_step: f32,

    /// Inclusive saturation range in percent
    pub saturation: PercentRange,

    /// Inclusive lightness range in percent
    pub lightness: PercentRange,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 5,
            hue_step: 137.5,
            saturation: PercentRange { min: 60.0, max: 90.0 },
            lightness: PercentRange { min: 40.0, max: 70.0 },
        }
    }
}

/// Closed interval of percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: f32,
    pub max: f32,
}

impl PercentRange {
    fn validate(&self, name: &str) -> Result<()> {
        let in_bounds = |v: f32| (0.0..=100.0).contains(&v);
        if !in_bounds(self.min) || !in_bounds(self.max) || self.min > self.max {
            return Err(ToolError::invalid_parameter(
                name,
                format!("{}..{}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

/// Image compression parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Initial JPEG quality (0.1-1.0)
    pub quality: f32,

    /// Target upper bound for the output size in megabytes (0.1-5.0)
    pub max_size_mb: f32,

    /// Longest output side in pixels
    pub max_dimension: u32,

    /// Re-encode attempts allowed while the output is too large
    pub max_iterations: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            quality: 0.8,
            max_size_mb: 1.0,
            max_dimension: 1920,
            max_iterations: 10,
        }
    }
}

impl CompressionConfig {
    /// Build a validated config from the two user-facing controls
    pub fn new(quality: f32, max_size_mb: f32) -> Result<Self> {
        let config = Self {
            quality,
            max_size_mb,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Size budget in bytes
    pub fn max_size_bytes(&self) -> u64 {
        (self.max_size_mb as f64 * 1024.0 * 1024.0) as u64
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.1..=1.0).contains(&self.quality) {
            return Err(ToolError::invalid_parameter("compression.quality", self.quality));
        }
        if !(0.1..=5.0).contains(&self.max_size_mb) {
            return Err(ToolError::invalid_parameter(
                "compression.max_size_mb",
                self.max_size_mb,
            ));
        }
        if self.max_dimension == 0 || self.max_dimension > MAX_OUTPUT_DIMENSION {
            return Err(ToolError::invalid_parameter(
                "compression.max_dimension",
                self.max_dimension,
            ));
        }
        Ok(())
    }
}

/// Layout parameters for the image arranger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    /// Every image is drawn into a square of this size
    pub tile_size: u32,

    /// Gap around and between tiles
    pub padding: u32,

    /// Canvas fill color
    pub background: Rgb,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self {
            tile_size: 400,
            padding: 20,
            background: Rgb::new(255, 255, 255),
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(ToolError::invalid_parameter(
                "extraction.canvas_size",
                self.canvas_size,
            ));
        }
        if self.sample_stride == 0 {
            return Err(ToolError::invalid_parameter("extraction.sample_stride", 0));
        }
        if self.max_colors == 0 || self.max_colors > MAX_PALETTE_COLORS {
            return Err(ToolError::invalid_parameter(
                "extraction.max_colors",
                self.max_colors,
            ));
        }
        Ok(())
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 || self.count > MAX_PALETTE_COLORS {
            return Err(ToolError::invalid_parameter("generation.count", self.count));
        }
        if !self.hue_step.is_finite() {
            return Err(ToolError::invalid_parameter("generation.hue_step", self.hue_step));
        }
        self.saturation.validate("generation.saturation")?;
        self.lightness.validate("generation.lightness")
    }
}

impl ArrangeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(ToolError::invalid_parameter("arrangement.tile_size", self.tile_size));
        }
        if self.padding > MAX_PADDING {
            return Err(ToolError::invalid_parameter("arrangement.padding", self.padding));
        }
        Ok(())
    }
}

impl ToolsConfig {
    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.generation.validate()?;
        self.compression.validate()?;
        self.arrangement.validate()
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ToolError::io(format!("Failed to read config {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            ToolError::io(format!("Failed to write config {}", path.display()), e)
        })
    }
}
