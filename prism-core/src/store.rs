//! In-memory palette list owned by a session

use crate::color::Color;
use crate::palette::{Palette, PaletteId, PaletteSource};
use crate::{Result, ToolError};

/// Holds the palettes created during one session, newest first
#[derive(Debug, Default)]
pub struct PaletteStore {
    palettes: Vec<Palette>,
    next_id: u64,
    generated_count: u64,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap extracted colors as an image palette named after the source file
    pub fn add_extracted(&mut self, file_name: &str, colors: Vec<Color>) -> Result<&Palette> {
        let name = format!("Extracted from {}", file_name);
        self.insert(name, PaletteSource::Image, colors)
    }

    /// Wrap generated colors as `Generated Palette <n>`
    pub fn add_generated(&mut self, colors: Vec<Color>) -> Result<&Palette> {
        let name = format!("Generated Palette {}", self.generated_count + 1);
        self.insert(name, PaletteSource::Generated, colors)?;
        self.generated_count += 1;
        Ok(&self.palettes[0])
    }

    fn insert(
        &mut self,
        name: String,
        source: PaletteSource,
        colors: Vec<Color>,
    ) -> Result<&Palette> {
        let id = PaletteId(self.next_id + 1);
        let palette = Palette::new(id, name, source, colors)?;
        self.next_id = id.0;

        log::debug!("Stored palette {} '{}' ({})", id, palette.name(), source);
        self.palettes.insert(0, palette);
        Ok(&self.palettes[0])
    }

    pub fn get(&self, id: PaletteId) -> Result<&Palette> {
        self.palettes
            .iter()
            .find(|p| p.id() == id)
            .ok_or(ToolError::PaletteNotFound(id))
    }

    /// Remove a palette for good
    pub fn delete(&mut self, id: PaletteId) -> Result<Palette> {
        let index = self
            .palettes
            .iter()
            .position(|p| p.id() == id)
            .ok_or(ToolError::PaletteNotFound(id))?;
        Ok(self.palettes.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Drop every palette, returning how many were released
    pub fn clear(&mut self) -> usize {
        let released = self.palettes.len();
        self.palettes.clear();
        released
    }
}
