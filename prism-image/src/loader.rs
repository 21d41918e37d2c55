//! Asynchronous image loading
//!
//! Files are read with `tokio::fs` and decoded on the blocking pool. The
//! format comes from the file's magic bytes, not its extension; content that
//! is not an image is rejected as input.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use prism_core::{Result, ToolError};

/// A decoded image plus the facts the tools need about its source file
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub file_name: String,
    pub format: ImageFormat,
    pub byte_len: u64,
    pub image: DynamicImage,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// File name used in notifications and output names
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Identify the image format from content, rejecting anything else
pub fn detect_format(file_name: &str, bytes: &[u8]) -> Result<ImageFormat> {
    image::guess_format(bytes)
        .map_err(|_| ToolError::input_rejected(format!("{} is not an image file", file_name)))
}

/// Decode in-memory file contents
pub fn decode_bytes(file_name: &str, bytes: &[u8]) -> Result<DecodedImage> {
    let format = detect_format(file_name, bytes)?;
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ToolError::image_load(format!("Failed to decode {}", file_name), e))?;

    log::debug!(
        "Decoded {} ({:?}, {}x{}, {} bytes)",
        file_name,
        format,
        image.width(),
        image.height(),
        bytes.len()
    );

    Ok(DecodedImage {
        file_name: file_name.to_string(),
        format,
        byte_len: bytes.len() as u64,
        image,
    })
}

/// Read and decode an image file without blocking the async runtime
pub async fn decode_file(path: &Path) -> Result<DecodedImage> {
    let file_name = display_name(path);
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ToolError::image_load(format!("Failed to open {}", path.display()), e))?;

    tokio::task::spawn_blocking(move || decode_bytes(&file_name, &bytes))
        .await
        .map_err(|e| ToolError::image_load("Decode task did not complete", e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_bytes() {
        let decoded = decode_bytes("tiny.png", &png_bytes()).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
        assert_eq!(decoded.file_name, "tiny.png");
    }

    #[test]
    fn test_non_image_is_rejected_as_input() {
        let err = decode_bytes("notes.txt", b"just some text").unwrap_err();
        assert_eq!(err.kind(), prism_core::ErrorKind::InputRejected);
        assert_eq!(err.user_message(), "notes.txt is not an image file");
    }

    #[test]
    fn test_truncated_image_is_a_load_failure() {
        let bytes = png_bytes();
        let err = decode_bytes("broken.png", &bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, ToolError::ImageLoad { .. }));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/photos/sunset.jpg")), "sunset.jpg");
    }

    #[tokio::test]
    async fn test_decode_missing_file() {
        let err = decode_file(Path::new("definitely/missing/photo.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::ImageLoad { .. }));
    }
}
