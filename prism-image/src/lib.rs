//! Image side of the prism tools: loading, color extraction, JPEG
//! compression, multi-image arrangement and QR codes. Everything CPU bound
//! runs on tokio's blocking pool when called through the `*_file` helpers.

pub mod arrange;
pub mod compress;
pub mod extract;
pub mod loader;
pub mod qr;

pub use arrange::{arrange, ArrangeItem, ArrangeSource, CropRect, Layout};
pub use compress::{compress_image, CompressedImage};
pub use extract::{extract_colors, Extraction};
pub use loader::{decode_file, DecodedImage};

use image::imageops::FilterType;
use prism_core::ResampleFilter;

pub(crate) fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Nearest => FilterType::Nearest,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Gaussian => FilterType::Gaussian,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}
