//! Dominant color extraction by pixel histogram.
//!
//! The image is squeezed onto a small square canvas, a fixed stride of its
//! pixels is sampled, translucent samples are dropped and the remaining exact
//! RGB values are counted. Near-identical colors are not merged.

use std::collections::HashMap;
use std::path::Path;

use image::{imageops, DynamicImage};
use prism_core::{Color, ExtractionConfig, Result, Rgb, ToolError};

use crate::filter_type;
use crate::loader::decode_file;

/// One histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    pub rgb: Rgb,
    pub count: usize,
}

/// Colors found in one image file
#[derive(Debug, Clone)]
pub struct Extraction {
    pub file_name: String,
    pub colors: Vec<Color>,
}

/// Sampled histogram sorted by descending count.
///
/// Equal counts keep the order in which their colors were first sampled.
/// At most `config.max_colors` entries are returned.
pub fn color_histogram(image: &DynamicImage, config: &ExtractionConfig) -> Vec<ColorCount> {
    let size = config.canvas_size;
    let canvas = imageops::resize(&image.to_rgba8(), size, size, filter_type(config.filter));

    // color -> (count, first sample index)
    let mut counts: HashMap<Rgb, (usize, usize)> = HashMap::new();
    let mut sampled = 0usize;
    for (order, pixel) in canvas.pixels().step_by(config.sample_stride).enumerate() {
        let [r, g, b, a] = pixel.0;
        if a <= config.alpha_threshold {
            continue;
        }
        sampled += 1;
        counts.entry(Rgb::new(r, g, b)).or_insert((0, order)).0 += 1;
    }

    let mut ranked: Vec<(Rgb, usize, usize)> = counts
        .into_iter()
        .map(|(rgb, (count, first))| (rgb, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    log::debug!(
        "Sampled {} opaque pixels, {} distinct colors",
        sampled,
        ranked.len()
    );

    ranked
        .into_iter()
        .take(config.max_colors)
        .map(|(rgb, count, _)| ColorCount { rgb, count })
        .collect()
}

/// Most frequent opaque colors of an image; empty if nothing is opaque
pub fn extract_colors(image: &DynamicImage, config: &ExtractionConfig) -> Vec<Color> {
    color_histogram(image, config)
        .into_iter()
        .map(|bucket| Color::from_rgb(bucket.rgb))
        .collect()
}

/// Decode a file and extract its colors off the async runtime
pub async fn extract_file(path: &Path, config: &ExtractionConfig) -> Result<Extraction> {
    config.validate()?;
    let decoded = decode_file(path).await?;
    let config = config.clone();

    tokio::task::spawn_blocking(move || Extraction {
        colors: extract_colors(&decoded.image, &config),
        file_name: decoded.file_name,
    })
    .await
    .map_err(|e| ToolError::Processing(format!("Color extraction did not complete: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use prism_core::ResampleFilter;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    #[test]
    fn test_solid_image_yields_one_color() {
        let histogram = color_histogram(&solid(10, 10, [12, 200, 99, 255]), &ExtractionConfig::default());
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[0].rgb, Rgb::new(12, 200, 99));
        // 100x100 canvas sampled every 4th pixel
        assert_eq!(histogram[0].count, 2500);
    }

    #[test]
    fn test_transparent_image_yields_nothing() {
        let colors = extract_colors(&solid(10, 10, [255, 0, 0, 0]), &ExtractionConfig::default());
        assert!(colors.is_empty());
    }

    #[test]
    fn test_alpha_threshold_is_exclusive() {
        let config = ExtractionConfig::default();
        assert!(extract_colors(&solid(8, 8, [1, 2, 3, 128]), &config).is_empty());
        assert_eq!(extract_colors(&solid(8, 8, [1, 2, 3, 129]), &config).len(), 1);
    }

    #[test]
    fn test_sorted_by_frequency_and_capped() {
        // Twelve vertical stripes of distinct colors with growing widths
        let config = ExtractionConfig {
            canvas_size: 78,
            sample_stride: 1,
            filter: ResampleFilter::Nearest,
            ..ExtractionConfig::default()
        };
        let mut img = RgbaImage::new(78, 1);
        let mut x = 0;
        for stripe in 0..12u32 {
            for _ in 0..=stripe {
                img.put_pixel(x, 0, Rgba([stripe as u8 * 20, 0, 0, 255]));
                x += 1;
            }
        }

        let histogram = color_histogram(&DynamicImage::ImageRgba8(img), &config);
        assert_eq!(histogram.len(), 8);
        assert_eq!(histogram[0].rgb, Rgb::new(220, 0, 0));
        assert!(histogram.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let config = ExtractionConfig {
            canvas_size: 2,
            sample_stride: 1,
            filter: ResampleFilter::Nearest,
            ..ExtractionConfig::default()
        };
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([0, 255, 0, 255]));

        let histogram = color_histogram(&DynamicImage::ImageRgba8(img), &config);
        let order: Vec<_> = histogram.iter().map(|b| b.rgb).collect();
        assert_eq!(
            order,
            vec![Rgb::new(0, 255, 0), Rgb::new(0, 0, 255), Rgb::new(255, 0, 0)]
        );
    }

    #[test]
    fn test_near_identical_colors_stay_distinct() {
        let config = ExtractionConfig {
            canvas_size: 2,
            sample_stride: 1,
            filter: ResampleFilter::Nearest,
            ..ExtractionConfig::default()
        };
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 255]));
        img.put_pixel(1, 1, Rgba([101, 100, 100, 255]));

        let colors = extract_colors(&DynamicImage::ImageRgba8(img), &config);
        assert_eq!(colors.len(), 2);
    }
}
