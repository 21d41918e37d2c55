//! Clipboard seam for copying color values

use crate::color::{Color, ColorFormat};
use crate::Result;

/// Anything that can receive copied text.
///
/// Writes always overwrite the previous contents. Implementations return
/// [`crate::ToolError::ClipboardDenied`] when the platform refuses access.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Clipboard that only remembers the last value written
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy one rendering of a color, returning the text written
pub fn copy_color<C: Clipboard + ?Sized>(
    clipboard: &mut C,
    color: &Color,
    format: ColorFormat,
) -> Result<String> {
    let text = color.format(format);
    clipboard.write_text(&text)?;
    log::debug!("Copied {} value {}", format.label(), text);
    Ok(text)
}
