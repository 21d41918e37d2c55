//! One-way JSON export of palettes

use serde::Serialize;

use crate::palette::Palette;
use crate::Result;

#[derive(Debug, Serialize)]
pub struct ExportedPalette {
    pub name: String,
    pub colors: Vec<ExportedColor>,
}

#[derive(Debug, Serialize)]
pub struct ExportedColor {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
    pub name: String,
}

impl From<&Palette> for ExportedPalette {
    fn from(palette: &Palette) -> Self {
        Self {
            name: palette.name().to_string(),
            colors: palette
                .colors()
                .iter()
                .map(|color| ExportedColor {
                    hex: color.hex(),
                    rgb: color.rgb.to_css(),
                    hsl: color.hsl.to_css(),
                    name: color.name.to_string(),
                })
                .collect(),
        }
    }
}

/// Render a palette as a pretty-printed JSON document
pub fn export_json(palette: &Palette) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ExportedPalette::from(palette))?)
}

/// Download file name: lowercased display name, whitespace runs become `-`
pub fn export_file_name(palette: &Palette) -> String {
    let slug = palette
        .name()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("{}.json", slug)
}
