//! Compose several images onto one canvas in a row, column or grid

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use prism_core::{ArrangeConfig, Result, ToolError};

use crate::loader::decode_file;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Horizontal,
    Vertical,
    Grid,
}

impl FromStr for Layout {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "row" => Ok(Layout::Horizontal),
            "vertical" | "column" => Ok(Layout::Vertical),
            "grid" => Ok(Layout::Grid),
            other => Err(ToolError::invalid_parameter("layout", other)),
        }
    }
}

/// Region of the source image to keep, in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FromStr for CropRect {
    type Err = ToolError;

    /// `x,y,width,height` in source pixels
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|_| ToolError::invalid_parameter("crop", s))?;
        match parts.as_slice() {
            [x, y, width, height] => Ok(CropRect {
                x: *x,
                y: *y,
                width: *width,
                height: *height,
            }),
            _ => Err(ToolError::invalid_parameter("crop", s)),
        }
    }
}

/// An image file to arrange, optionally cropped first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrangeSource {
    pub path: PathBuf,
    pub crop: Option<CropRect>,
}

impl FromStr for ArrangeSource {
    type Err = ToolError;

    /// `path` or `path@x,y,width,height`. A suffix after `@` that is not a
    /// crop is kept as part of the path.
    fn from_str(s: &str) -> Result<Self> {
        if let Some((path, crop)) = s.rsplit_once('@') {
            if let Ok(crop) = crop.parse::<CropRect>() {
                return Ok(ArrangeSource {
                    path: PathBuf::from(path),
                    crop: Some(crop),
                });
            }
        }
        Ok(ArrangeSource {
            path: PathBuf::from(s),
            crop: None,
        })
    }
}

impl From<&Path> for ArrangeSource {
    fn from(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            crop: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArrangeItem {
    pub image: DynamicImage,
    pub crop: Option<CropRect>,
}

impl From<DynamicImage> for ArrangeItem {
    fn from(image: DynamicImage) -> Self {
        Self { image, crop: None }
    }
}

/// Smallest column count whose square holds `count` tiles
pub fn grid_columns(count: u32) -> u32 {
    let mut cols: u32 = 1;
    while (cols as u64) * (cols as u64) < count as u64 {
        cols += 1;
    }
    cols
}

/// Canvases above this many pixels are refused instead of allocated
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

fn span(tiles: u32, config: &ArrangeConfig) -> Option<u32> {
    let gaps = tiles.checked_add(1)?.checked_mul(config.padding)?;
    tiles.checked_mul(config.tile_size)?.checked_add(gaps)
}

fn too_large(layout: Layout, count: u32, config: &ArrangeConfig) -> ToolError {
    ToolError::invalid_parameter(
        "arrangement",
        format!(
            "{} images of {}px with {}px padding in a {:?} layout",
            count, config.tile_size, config.padding, layout
        ),
    )
}

/// (columns, rows) used for `count` images
pub fn grid_shape(layout: Layout, count: u32) -> (u32, u32) {
    match layout {
        Layout::Horizontal => (count, 1),
        Layout::Vertical => (1, count),
        Layout::Grid => {
            let cols = grid_columns(count);
            (cols, count.div_ceil(cols))
        }
    }
}

/// Canvas dimensions for `count` images.
///
/// Fails when the canvas would overflow `u32` or exceed [`MAX_CANVAS_PIXELS`].
pub fn canvas_size(layout: Layout, count: u32, config: &ArrangeConfig) -> Result<(u32, u32)> {
    let (cols, rows) = grid_shape(layout, count);
    match (span(cols, config), span(rows, config)) {
        (Some(w), Some(h)) if w as u64 * h as u64 <= MAX_CANVAS_PIXELS => Ok((w, h)),
        _ => Err(too_large(layout, count, config)),
    }
}

/// Top-left corner of tile `index`
pub fn tile_origin(
    layout: Layout,
    index: u32,
    count: u32,
    config: &ArrangeConfig,
) -> Result<(u32, u32)> {
    let (cols, _) = grid_shape(layout, count);
    let (col, row) = (index % cols, index / cols);
    let offset = |n: u32| {
        config
            .tile_size
            .checked_add(config.padding)?
            .checked_mul(n)?
            .checked_add(config.padding)
    };
    match (offset(col), offset(row)) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(too_large(layout, count, config)),
    }
}

fn crop_source(item: &ArrangeItem) -> Result<DynamicImage> {
    let Some(rect) = item.crop else {
        return Ok(item.image.clone());
    };

    let fits = rect.width > 0
        && rect.height > 0
        && rect.x.saturating_add(rect.width) <= item.image.width()
        && rect.y.saturating_add(rect.height) <= item.image.height();
    if !fits {
        return Err(ToolError::input_rejected(format!(
            "Crop {}x{} at ({}, {}) does not fit a {}x{} image",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            item.image.width(),
            item.image.height()
        )));
    }

    Ok(item.image.crop_imm(rect.x, rect.y, rect.width, rect.height))
}

/// Draw every item, stretched to a square tile, on a filled canvas
pub fn arrange(items: &[ArrangeItem], layout: Layout, config: &ArrangeConfig) -> Result<RgbaImage> {
    config.validate()?;
    if items.is_empty() {
        return Err(ToolError::input_rejected("No images to arrange"));
    }

    let count = u32::try_from(items.len())
        .map_err(|_| ToolError::invalid_parameter("arrangement", items.len()))?;
    let (width, height) = canvas_size(layout, count, config)?;
    let bg = config.background;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([bg.r, bg.g, bg.b, 255]));

    for (index, item) in items.iter().enumerate() {
        let source = crop_source(item)?;
        let tile = imageops::resize(
            &source.to_rgba8(),
            config.tile_size,
            config.tile_size,
            FilterType::Triangle,
        );
        let (x, y) = tile_origin(layout, index as u32, count, config)?;
        imageops::overlay(&mut canvas, &tile, x as i64, y as i64);
    }

    log::info!("Arranged {} images into {}x{} ({:?})", count, width, height, layout);
    Ok(canvas)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ToolError::image_encode("PNG encoding failed", e))?;
    Ok(buf)
}

/// `arranged-images-<unix millis>.png`
pub fn output_file_name(timestamp_millis: u128) -> String {
    format!("arranged-images-{}.png", timestamp_millis)
}

/// Decode files and arrange them off the async runtime
pub async fn arrange_files(
    sources: &[ArrangeSource],
    layout: Layout,
    config: &ArrangeConfig,
) -> Result<RgbaImage> {
    let mut items = Vec::with_capacity(sources.len());
    for source in sources {
        items.push(ArrangeItem {
            image: decode_file(&source.path).await?.image,
            crop: source.crop,
        });
    }

    let config = config.clone();
    tokio::task::spawn_blocking(move || arrange(&items, layout, &config))
        .await
        .map_err(|e| ToolError::Processing(format!("Arranging did not complete: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Rgb;

    fn solid(rgba: [u8; 4]) -> ArrangeItem {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba(rgba))).into()
    }

    #[test]
    fn test_grid_columns() {
        assert_eq!(grid_columns(1), 1);
        assert_eq!(grid_columns(2), 2);
        assert_eq!(grid_columns(4), 2);
        assert_eq!(grid_columns(5), 3);
        assert_eq!(grid_columns(9), 3);
        assert_eq!(grid_columns(10), 4);
        assert_eq!(grid_columns(u32::MAX), 65536);
    }

    #[test]
    fn test_canvas_sizes() {
        let config = ArrangeConfig::default();
        assert_eq!(canvas_size(Layout::Horizontal, 3, &config).unwrap(), (1280, 440));
        assert_eq!(canvas_size(Layout::Vertical, 3, &config).unwrap(), (440, 1280));
        // 5 images -> 3 columns, 2 rows
        assert_eq!(canvas_size(Layout::Grid, 5, &config).unwrap(), (1280, 860));
    }

    #[test]
    fn test_tile_origins() {
        let config = ArrangeConfig::default();
        assert_eq!(tile_origin(Layout::Horizontal, 0, 3, &config).unwrap(), (20, 20));
        assert_eq!(tile_origin(Layout::Horizontal, 2, 3, &config).unwrap(), (860, 20));
        assert_eq!(tile_origin(Layout::Vertical, 1, 3, &config).unwrap(), (20, 440));
        assert_eq!(tile_origin(Layout::Grid, 4, 5, &config).unwrap(), (440, 440));
    }

    #[test]
    fn test_overflowing_geometry_is_an_error() {
        let huge = ArrangeConfig {
            tile_size: 2_000_000_000,
            padding: 20,
            ..ArrangeConfig::default()
        };
        let err = canvas_size(Layout::Horizontal, 3, &huge).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameter { .. }));

        let wide_gaps = ArrangeConfig {
            tile_size: 1,
            padding: u32::MAX,
            ..ArrangeConfig::default()
        };
        assert!(tile_origin(Layout::Horizontal, 1, 2, &wide_gaps).is_err());
        assert!(canvas_size(Layout::Grid, 4, &wide_gaps).is_err());
    }

    #[test]
    fn test_canvas_pixel_cap() {
        let config = ArrangeConfig {
            tile_size: 4096,
            padding: 0,
            ..ArrangeConfig::default()
        };
        // 16 tiles of 4096 in a row: 65536 x 4096 pixels
        assert!(canvas_size(Layout::Horizontal, 16, &config).is_err());
        assert!(canvas_size(Layout::Horizontal, 2, &config).is_ok());
    }

    #[test]
    fn test_arrange_draws_tiles_on_background() {
        let config = ArrangeConfig {
            tile_size: 10,
            padding: 2,
            background: Rgb::new(255, 255, 255),
        };
        let items = vec![solid([255, 0, 0, 255]), solid([0, 0, 255, 255])];
        let canvas = arrange(&items, Layout::Horizontal, &config).unwrap();

        assert_eq!(canvas.dimensions(), (26, 14));
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(7, 7).0, [255, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(19, 7).0, [0, 0, 255, 255]);
        assert_eq!(canvas.get_pixel(13, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_crop_is_applied_and_validated() {
        let config = ArrangeConfig {
            tile_size: 4,
            padding: 0,
            background: Rgb::new(0, 0, 0),
        };
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 255, 0, 255]));
        for x in 4..8 {
            for y in 0..8 {
                img.put_pixel(x, y, Rgba([255, 0, 255, 255]));
            }
        }
        let item = ArrangeItem {
            image: DynamicImage::ImageRgba8(img.clone()),
            crop: Some(CropRect { x: 4, y: 0, width: 4, height: 8 }),
        };
        let canvas = arrange(&[item], Layout::Grid, &config).unwrap();
        assert!(canvas.pixels().all(|p| p.0 == [255, 0, 255, 255]));

        let bad = ArrangeItem {
            image: DynamicImage::ImageRgba8(img),
            crop: Some(CropRect { x: 6, y: 0, width: 4, height: 8 }),
        };
        let err = arrange(&[bad], Layout::Grid, &config).unwrap_err();
        assert_eq!(err.kind(), prism_core::ErrorKind::InputRejected);
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = arrange(&[], Layout::Grid, &ArrangeConfig::default()).unwrap_err();
        assert_eq!(err.user_message(), "No images to arrange");
    }

    #[test]
    fn test_png_output() {
        let canvas = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
        let bytes = encode_png(&canvas).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        assert_eq!(output_file_name(1700000000000), "arranged-images-1700000000000.png");
    }

    #[test]
    fn test_source_parse() {
        let plain: ArrangeSource = "photos/a.png".parse().unwrap();
        assert_eq!(plain, ArrangeSource::from(Path::new("photos/a.png")));

        let cropped: ArrangeSource = "a.png@10,20,30,40".parse().unwrap();
        assert_eq!(cropped.path, PathBuf::from("a.png"));
        assert_eq!(
            cropped.crop,
            Some(CropRect { x: 10, y: 20, width: 30, height: 40 })
        );

        let odd_name: ArrangeSource = "me@home.png".parse().unwrap();
        assert_eq!(odd_name.path, PathBuf::from("me@home.png"));
        assert_eq!(odd_name.crop, None);

        assert!("1,2,3".parse::<CropRect>().is_err());
        assert!("1,2,3,x".parse::<CropRect>().is_err());
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("Grid".parse::<Layout>().unwrap(), Layout::Grid);
        assert_eq!("horizontal".parse::<Layout>().unwrap(), Layout::Horizontal);
        assert!("diagonal".parse::<Layout>().is_err());
    }
}
