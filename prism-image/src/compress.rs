//! JPEG re-encoding under a size budget

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::RgbImage;
use prism_core::{CompressionConfig, Result, ToolError};

use crate::loader::{decode_file, DecodedImage};

/// Quality never drops below this while shrinking toward the budget
pub const MIN_QUALITY: f32 = 0.1;

const QUALITY_STEP: f32 = 0.1;
const SHRINK_FACTOR: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub original_name: String,
    pub file_name: String,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percent saved; negative when the output grew
    pub compression_ratio: i64,
    pub width: u32,
    pub height: u32,
    pub quality: f32,
    bytes: Vec<u8>,
}

impl CompressedImage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the encoded JPEG into `dir`, returning the full path
    pub async fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write {}", path.display()), e))?;
        Ok(path)
    }
}

/// `compressed_<stem>.jpg`
pub fn output_file_name(original_name: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| original_name.to_string());
    format!("compressed_{}.jpg", stem)
}

/// Largest size with the same aspect ratio whose longer side is at most `max`
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = max as f64 / longest as f64;
    let scaled = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max);
    (scaled(width), scaled(height))
}

pub fn compression_ratio(original: u64, compressed: u64) -> i64 {
    if original == 0 {
        return 0;
    }
    ((original as f64 - compressed as f64) / original as f64 * 100.0).round() as i64
}

/// Human readable size, base 1024, up to two decimals
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

fn encode_jpeg(image: &RgbImage, quality: f32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let quality = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        encoder
            .encode_image(image)
            .map_err(|e| ToolError::image_encode("JPEG encoding failed", e))?;
    }
    Ok(buf)
}

/// Compress a decoded image.
///
/// The image is first scaled to fit `max_dimension`, then encoded at the
/// configured quality. While the output exceeds `max_size_mb` the quality
/// is lowered step by step down to [`MIN_QUALITY`], after which the
/// dimensions shrink by 10% per attempt. Gives up after `max_iterations`
/// attempts and returns the last encoding.
pub fn compress_image(decoded: &DecodedImage, config: &CompressionConfig) -> Result<CompressedImage> {
    config.validate()?;

    let (width, height) = fit_within(decoded.width(), decoded.height(), config.max_dimension);
    let mut rgb = if (width, height) == (decoded.width(), decoded.height()) {
        decoded.image.to_rgb8()
    } else {
        imageops::resize(&decoded.image.to_rgb8(), width, height, FilterType::Triangle)
    };

    let budget = config.max_size_bytes();
    let mut quality = config.quality;
    let mut bytes = encode_jpeg(&rgb, quality)?;
    let mut attempts = 0;

    while bytes.len() as u64 > budget && attempts < config.max_iterations {
        attempts += 1;
        if quality - MIN_QUALITY > f32::EPSILON {
            quality = (quality - QUALITY_STEP).max(MIN_QUALITY);
        } else {
            let w = ((rgb.width() as f32 * SHRINK_FACTOR) as u32).max(1);
            let h = ((rgb.height() as f32 * SHRINK_FACTOR) as u32).max(1);
            rgb = imageops::resize(&rgb, w, h, FilterType::Triangle);
        }
        bytes = encode_jpeg(&rgb, quality)?;
    }

    if bytes.len() as u64 > budget {
        log::warn!(
            "{} is still {} after {} attempts",
            decoded.file_name,
            format_file_size(bytes.len() as u64),
            attempts
        );
    }

    let compressed_size = bytes.len() as u64;
    log::info!(
        "Compressed {}: {} -> {} at quality {:.1}",
        decoded.file_name,
        format_file_size(decoded.byte_len),
        format_file_size(compressed_size),
        quality
    );

    Ok(CompressedImage {
        original_name: decoded.file_name.clone(),
        file_name: output_file_name(&decoded.file_name),
        original_size: decoded.byte_len,
        compressed_size,
        compression_ratio: compression_ratio(decoded.byte_len, compressed_size),
        width: rgb.width(),
        height: rgb.height(),
        quality,
        bytes,
    })
}

/// Decode and compress a file off the async runtime
pub async fn compress_file(path: &Path, config: &CompressionConfig) -> Result<CompressedImage> {
    let decoded = decode_file(path).await?;
    let config = config.clone();

    tokio::task::spawn_blocking(move || compress_image(&decoded, &config))
        .await
        .map_err(|e| ToolError::Processing(format!("Compression did not complete: {}", e)))?
}
