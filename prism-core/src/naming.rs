//! Coarse color names derived from HSL buckets

use std::fmt;

use crate::color::Hsl;

/// Below this saturation a color is named on the gray scale
pub const GRAY_SATURATION_LIMIT: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    Red,
    Orange,
    Yellow,
    YellowGreen,
    Green,
    GreenCyan,
    Cyan,
    Blue,
    BluePurple,
    Purple,
    PurplePink,
    Pink,
    Black,
    DarkGray,
    Gray,
    LightGray,
    White,
}

/// Upper bounds (exclusive) of the 30 degree hue buckets starting at 15.
/// Anything at or above 345 wraps back to red.
const HUE_BUCKETS: [(u16, ColorName); 11] = [
    (15, ColorName::Red),
    (45, ColorName::Orange),
    (75, ColorName::Yellow),
    (105, ColorName::YellowGreen),
    (135, ColorName::Green),
    (165, ColorName::GreenCyan),
    (195, ColorName::Cyan),
    (225, ColorName::Blue),
    (255, ColorName::BluePurple),
    (285, ColorName::Purple),
    (315, ColorName::PurplePink),
];

impl ColorName {
    pub fn from_hsl(hsl: Hsl) -> Self {
        if hsl.s < GRAY_SATURATION_LIMIT {
            Self::for_lightness(hsl.l)
        } else {
            Self::for_hue(hsl.h)
        }
    }

    /// Name a chromatic hue in degrees; values past 360 are wrapped
    pub fn for_hue(hue: u16) -> Self {
        let hue = hue % 360;
        if hue >= 345 {
            return ColorName::Red;
        }
        HUE_BUCKETS
            .iter()
            .find(|(upper, _)| hue < *upper)
            .map(|(_, name)| *name)
            .unwrap_or(ColorName::Pink)
    }

    /// Five-step gray scale by lightness percent
    pub fn for_lightness(lightness: u8) -> Self {
        match lightness {
            0..=19 => ColorName::Black,
            20..=39 => ColorName::DarkGray,
            40..=59 => ColorName::Gray,
            60..=79 => ColorName::LightGray,
            _ => ColorName::White,
        }
    }

    pub fn is_gray(self) -> bool {
        matches!(
            self,
            ColorName::Black
                | ColorName::DarkGray
                | ColorName::Gray
                | ColorName::LightGray
                | ColorName::White
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorName::Red => "Red",
            ColorName::Orange => "Orange",
            ColorName::Yellow => "Yellow",
            ColorName::YellowGreen => "Yellow Green",
            ColorName::Green => "Green",
            ColorName::GreenCyan => "Green Cyan",
            ColorName::Cyan => "Cyan",
            ColorName::Blue => "Blue",
            ColorName::BluePurple => "Blue Purple",
            ColorName::Purple => "Purple",
            ColorName::PurplePink => "Purple Pink",
            ColorName::Pink => "Pink",
            ColorName::Black => "Black",
            ColorName::DarkGray => "Dark Gray",
            ColorName::Gray => "Gray",
            ColorName::LightGray => "Light Gray",
            ColorName::White => "White",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
