//! File based runs of extraction, compression and arrangement

use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};
use prism_core::{ArrangeConfig, CompressionConfig, ErrorKind, ExtractionConfig, Rgb};
use prism_image::arrange::{arrange_files, ArrangeSource, CropRect, Layout};
use prism_image::compress::compress_file;
use prism_image::extract::extract_file;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("prism-image-{}-{}", tag, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str, img: &RgbaImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png).unwrap();
    path
}

fn two_tone(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width * 3 / 4 {
            Rgba([30, 60, 200, 255])
        } else {
            Rgba([240, 200, 10, 255])
        }
    })
}

#[tokio::test]
async fn test_extract_file_ranks_dominant_color_first() {
    let dir = scratch_dir("extract");
    let path = write_png(&dir, "tones.png", &two_tone(40, 40));

    let extraction = extract_file(&path, &ExtractionConfig::default()).await.unwrap();
    assert_eq!(extraction.file_name, "tones.png");
    assert!(!extraction.colors.is_empty());
    assert_eq!(extraction.colors[0].rgb, Rgb::new(30, 60, 200));

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_text_file_is_rejected() {
    let dir = scratch_dir("reject");
    let path = dir.join("readme.txt");
    std::fs::write(&path, "not pixels").unwrap();

    let err = extract_file(&path, &ExtractionConfig::default()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputRejected);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_compress_and_save() {
    let dir = scratch_dir("compress");
    let path = write_png(&dir, "wide.png", &two_tone(300, 100));
    let config = CompressionConfig {
        max_dimension: 150,
        ..CompressionConfig::default()
    };

    let compressed = compress_file(&path, &config).await.unwrap();
    assert_eq!(compressed.file_name, "compressed_wide.jpg");
    assert_eq!((compressed.width, compressed.height), (150, 50));

    let saved = compressed.save_to(&dir).await.unwrap();
    let on_disk = std::fs::read(&saved).unwrap();
    assert_eq!(on_disk.len() as u64, compressed.compressed_size);
    assert_eq!(image::guess_format(&on_disk).unwrap(), ImageFormat::Jpeg);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_arrange_files_in_grid() {
    let dir = scratch_dir("arrange");
    let paths: Vec<PathBuf> = (0..3)
        .map(|i| {
            let img = RgbaImage::from_pixel(5, 5, Rgba([i * 80, 0, 0, 255]));
            write_png(&dir, &format!("tile{}.png", i), &img)
        })
        .collect();
    let sources: Vec<ArrangeSource> = paths.iter().map(|p| p.as_path().into()).collect();
    let config = ArrangeConfig {
        tile_size: 10,
        padding: 1,
        ..ArrangeConfig::default()
    };

    let canvas = arrange_files(&sources, Layout::Grid, &config).await.unwrap();
    assert_eq!(canvas.dimensions(), (23, 23));
    assert_eq!(canvas.get_pixel(16, 16).0, [255, 255, 255, 255]);
    assert_eq!(canvas.get_pixel(5, 16).0, [160, 0, 0, 255]);

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_arrange_file_with_crop() {
    let dir = scratch_dir("crop");
    let img = RgbaImage::from_fn(8, 4, |x, _| {
        if x < 4 {
            Rgba([0, 200, 0, 255])
        } else {
            Rgba([0, 0, 200, 255])
        }
    });
    let path = write_png(&dir, "halves.png", &img);
    let source: ArrangeSource = format!("{}@4,0,4,4", path.display()).parse().unwrap();
    assert_eq!(source.crop, Some(CropRect { x: 4, y: 0, width: 4, height: 4 }));

    let config = ArrangeConfig {
        tile_size: 6,
        padding: 0,
        ..ArrangeConfig::default()
    };
    let canvas = arrange_files(&[source], Layout::Horizontal, &config).await.unwrap();
    assert!(canvas.pixels().all(|p| p.0 == [0, 0, 200, 255]));

    std::fs::remove_dir_all(dir).ok();
}
