//! End-to-end checks of the palette workflow through the public API

use prism_core::clipboard::{copy_color, MemoryClipboard};
use prism_core::color::{parse_hex, rgb_to_hsl};
use prism_core::export::{export_file_name, export_json};
use prism_core::generate::generate_palette_colors;
use prism_core::{
    Color, ColorFormat, ColorName, GenerationConfig, Hsl, PaletteSource, PaletteStore, Rgb,
    ToolError,
};

#[test]
fn test_red_reference_values() {
    let red = Rgb::new(255, 0, 0);
    assert_eq!(red.to_hex(), "#ff0000");
    assert_eq!(rgb_to_hsl(red), Hsl { h: 0, s: 100, l: 50 });
    assert_eq!(Color::from_hex("#ff0000").unwrap().name, ColorName::Red);
    assert_eq!(parse_hex("#ff0000").unwrap(), red);
}

#[test]
fn test_generate_store_export_copy() {
    let mut store = PaletteStore::new();
    let config = GenerationConfig::default();

    let first = store
        .add_generated(generate_palette_colors(&config))
        .unwrap()
        .clone();
    let second = store
        .add_generated(generate_palette_colors(&config))
        .unwrap()
        .clone();

    assert_eq!(first.len(), 5);
    assert_eq!(first.source(), PaletteSource::Generated);
    assert_ne!(first.colors(), second.colors());
    assert_eq!(export_file_name(&second), "generated-palette-2.json");

    let json = export_json(&first).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["name"], "Generated Palette 1");
    assert_eq!(value["colors"].as_array().unwrap().len(), 5);

    let mut clipboard = MemoryClipboard::new();
    let color = first.color(2).unwrap();
    let copied = copy_color(&mut clipboard, color, ColorFormat::Hsl).unwrap();
    assert_eq!(clipboard.contents(), Some(copied.as_str()));
    assert!(copied.starts_with("hsl("));

    store.delete(first.id()).unwrap();
    assert!(matches!(
        store.get(first.id()),
        Err(ToolError::PaletteNotFound(_))
    ));
    assert_eq!(store.len(), 1);
}
