//! Color model shared by extraction and generation
//!
//! A [`Color`] carries an 8-bit RGB triple, its integer-rounded HSL
//! description and a coarse human-readable [`ColorName`]. The hex form is
//! always rendered from the RGB triple and the HSL is always derived from it.

use std::fmt;

use ::palette::{FromColor, Hsl as PaletteHsl, Srgb};
use serde::{Deserialize, Serialize};

use crate::naming::ColorName;
use crate::{Result, ToolError};

/// 8-bit sRGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as `#rrggbb` (lowercase, zero padded)
    pub fn to_hex(self) -> String {
        let packed = ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32;
        format!("#{:06x}", packed)
    }

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Integer-rounded HSL: hue in [0, 360), saturation and lightness in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// CSS functional notation, e.g. `hsl(0, 100%, 50%)`
    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// Round floating HSL components, wrapping a hue of 360 back to 0
    pub fn rounded(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: (h.rem_euclid(360.0).round() as u16) % 360,
            s: s.clamp(0.0, 100.0).round() as u8,
            l: l.clamp(0.0, 100.0).round() as u8,
        }
    }
}

/// Parse `#rrggbb` or `rrggbb` into an RGB triple
pub fn parse_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ToolError::InvalidColor {
            input: hex.to_string(),
        });
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ToolError::InvalidColor {
            input: hex.to_string(),
        })
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to rounded HSL.
///
/// Pure grays (max == min) come out with hue 0 and saturation 0. The
/// conversion is lossy; it only feeds display and naming.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let srgb: Srgb<f32> = Srgb::new(rgb.r, rgb.g, rgb.b).into_format();
    let hsl: PaletteHsl = PaletteHsl::from_color(srgb);

    Hsl::rounded(
        hsl.hue.into_positive_degrees(),
        hsl.saturation * 100.0,
        hsl.lightness * 100.0,
    )
}

/// Convert HSL (degrees, percent, percent) to 8-bit RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let hsl: PaletteHsl = PaletteHsl::new(
        h.rem_euclid(360.0),
        (s / 100.0).clamp(0.0, 1.0),
        (l / 100.0).clamp(0.0, 1.0),
    );
    let srgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
    Rgb::new(srgb.red, srgb.green, srgb.blue)
}

/// A fully described color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub name: ColorName,
}

impl Color {
    /// Build from an RGB triple; HSL and name are derived from it
    pub fn from_rgb(rgb: Rgb) -> Self {
        let hsl = rgb_to_hsl(rgb);
        Self {
            rgb,
            hsl,
            name: ColorName::from_hsl(hsl),
        }
    }

    /// Build from a hex string such as `#3366cc`
    pub fn from_hex(hex: &str) -> Result<Self> {
        parse_hex(hex).map(Self::from_rgb)
    }

    /// Build from floating HSL. The value is quantized to 8-bit RGB first
    /// and the stored HSL and name are derived back from that RGB.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        Self::from_rgb(hsl_to_rgb(h, s, l))
    }

    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    /// Render one of the copyable text forms
    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.hex(),
            ColorFormat::Rgb => self.rgb.to_css(),
            ColorFormat::Hsl => self.hsl.to_css(),
        }
    }
}

/// Text representations offered for copying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

impl ColorFormat {
    pub fn label(self) -> &'static str {
        match self {
            ColorFormat::Hex => "Hex",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
        }
    }
}

impl std::str::FromStr for ColorFormat {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            "hsl" => Ok(ColorFormat::Hsl),
            other => Err(ToolError::invalid_parameter("format", other)),
        }
    }
}
