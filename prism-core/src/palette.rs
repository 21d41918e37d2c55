//! Palettes: immutable, named groups of colors

use std::fmt;

use crate::color::Color;
use crate::{Result, ToolError};

/// Largest number of colors a palette may hold
pub const MAX_PALETTE_COLORS: usize = 8;

/// Session-unique palette identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteId(pub u64);

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaletteId {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(PaletteId)
            .map_err(|_| ToolError::invalid_parameter("palette id", s))
    }
}

/// Where a palette's colors came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    Image,
    Generated,
}

impl fmt::Display for PaletteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteSource::Image => f.write_str("image"),
            PaletteSource::Generated => f.write_str("generated"),
        }
    }
}

/// An ordered set of 1 to 8 colors. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    id: PaletteId,
    name: String,
    source: PaletteSource,
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(
        id: PaletteId,
        name: impl Into<String>,
        source: PaletteSource,
        colors: Vec<Color>,
    ) -> Result<Self> {
        if colors.is_empty() || colors.len() > MAX_PALETTE_COLORS {
            return Err(ToolError::PaletteSize {
                count: colors.len(),
                max: MAX_PALETTE_COLORS,
            });
        }

        Ok(Self {
            id,
            name: name.into(),
            source,
            colors,
        })
    }

    pub fn id(&self) -> PaletteId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> PaletteSource {
        self.source
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color(&self, index: usize) -> Result<&Color> {
        self.colors
            .get(index)
            .ok_or(ToolError::ColorIndexOutOfRange { id: self.id, index })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a palette built through [`Palette::new`]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
