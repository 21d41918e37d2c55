//! QR code rendering and scanning

use std::io::Cursor;
use std::path::Path;

use image::{imageops, DynamicImage, GrayImage, ImageFormat, Luma};
use prism_core::{Result, ToolError};
use qrcode::types::QrError;
use qrcode::{Color as Module, EcLevel, QrCode};

use crate::loader::decode_file;

/// Side of every rendered QR image in pixels
pub const QR_IMAGE_SIZE: u32 = 512;

/// Quiet zone around the symbol, in modules
pub const QR_MARGIN: u32 = 2;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Render `data` as a black on white QR code of [`QR_IMAGE_SIZE`] pixels
pub fn encode(data: &str) -> Result<GrayImage> {
    if data.is_empty() {
        return Err(ToolError::input_rejected("Nothing to encode"));
    }

    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M).map_err(|e| match e {
        QrError::DataTooLong => ToolError::input_rejected("Data is too large for a QR code"),
        other => ToolError::Processing(format!("QR encoding failed: {}", other)),
    })?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let total = modules + 2 * QR_MARGIN;
    let scale = (QR_IMAGE_SIZE / total).max(1);

    let symbol = GrayImage::from_fn(total * scale, total * scale, |x, y| {
        let (mx, my) = (x / scale, y / scale);
        let inside = (QR_MARGIN..QR_MARGIN + modules).contains(&mx)
            && (QR_MARGIN..QR_MARGIN + modules).contains(&my);
        if !inside {
            return LIGHT;
        }
        let index = ((my - QR_MARGIN) * modules + (mx - QR_MARGIN)) as usize;
        match colors[index] {
            Module::Dark => DARK,
            Module::Light => LIGHT,
        }
    });

    // Integer scaling leaves a remainder; it becomes extra white border
    let mut canvas = GrayImage::from_pixel(QR_IMAGE_SIZE, QR_IMAGE_SIZE, LIGHT);
    let offset = (QR_IMAGE_SIZE.saturating_sub(symbol.width()) / 2) as i64;
    imageops::overlay(&mut canvas, &symbol, offset, offset);

    log::debug!(
        "Encoded {} bytes as a {}x{} module QR code ({}px per module)",
        data.len(),
        modules,
        modules,
        scale
    );
    Ok(canvas)
}

/// Read the first decodable QR code in an image
pub fn decode(image: &DynamicImage) -> Result<String> {
    let gray = image.to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32).0[0],
    );

    let mut failure = String::from("no QR code grid detected");
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(e) => failure = e.to_string(),
        }
    }
    Err(ToolError::QrNotFound { message: failure })
}

pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ToolError::image_encode("PNG encoding failed", e))?;
    Ok(buf)
}

/// `qr-code-<unix millis>.png`
pub fn output_file_name(timestamp_millis: u128) -> String {
    format!("qr-code-{}.png", timestamp_millis)
}

/// Decode an image file and scan it off the async runtime
pub async fn scan_file(path: &Path) -> Result<String> {
    let decoded = decode_file(path).await?;
    tokio::task::spawn_blocking(move || decode(&decoded.image))
        .await
        .map_err(|e| ToolError::Processing(format!("QR scan did not complete: {}", e)))?
}
