//! # Prism core
//!
//! Color model and session state for the prism mini-tools.
//!
//! - [`color`]: RGB, hex and HSL conversions
//! - [`naming`]: coarse hue/lightness based color names
//! - [`generate`]: golden-angle palette generation
//! - [`store`]: the in-memory palette list a session owns
//! - [`export`]: JSON export of a palette
//! - [`coin`]: the coin flipper tool
//!
//! ## Example
//!
//! ```rust
//! use prism_core::{generate::generate_palette_colors, GenerationConfig, PaletteStore};
//!
//! let mut store = PaletteStore::new();
//! let colors = generate_palette_colors(&GenerationConfig::default());
//! let palette = store.add_generated(colors)?;
//! assert_eq!(palette.len(), 5);
//! println!("{}", prism_core::export::export_json(palette)?);
//! # Ok::<(), prism_core::ToolError>(())
//! ```

pub mod clipboard;
pub mod coin;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod naming;
pub mod notice;
pub mod palette;
pub mod store;

pub use color::{Color, ColorFormat, Hsl, Rgb};
pub use config::{
    ArrangeConfig, CompressionConfig, ExtractionConfig, GenerationConfig, ResampleFilter,
    ToolsConfig,
};
pub use error::{ErrorKind, Result, ToolError};
pub use naming::ColorName;
pub use notice::{Notice, NoticeLevel};
pub use crate::palette::{Palette, PaletteId, PaletteSource, MAX_PALETTE_COLORS};
pub use store::PaletteStore;
