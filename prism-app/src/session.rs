//! The state one `prism` process works on.
//!
//! A [`Session`] owns every palette, compressed image and coin flip made
//! while the shell runs. Each command runs to completion before the next one
//! is read; failures are recovered here and come back as notices.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use prism_core::clipboard::{copy_color, Clipboard};
use prism_core::coin::CoinFlipper;
use prism_core::export::{export_file_name, export_json};
use prism_core::generate::generate_palette_colors;
use prism_core::{
    ColorFormat, Notice, Palette, PaletteId, PaletteStore, Result, ToolError, ToolsConfig,
};
use prism_image::arrange::{self, arrange_files, ArrangeSource, Layout};
use prism_image::compress::{compress_file, format_file_size, CompressedImage};
use prism_image::extract::extract_file;
use prism_image::loader::display_name;
use prism_image::qr;

use crate::command::{Command, HELP};

pub struct Session<C: Clipboard> {
    config: ToolsConfig,
    palettes: PaletteStore,
    coin: CoinFlipper,
    compressed: Vec<CompressedImage>,
    last_scan: Option<String>,
    clipboard: C,
}

impl<C: Clipboard> Session<C> {
    pub fn new(config: ToolsConfig, clipboard: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            palettes: PaletteStore::new(),
            coin: CoinFlipper::new(),
            compressed: Vec::new(),
            last_scan: None,
            clipboard,
        })
    }

    /// Run one command, reporting every outcome as notices
    pub async fn execute(&mut self, command: Command) -> Vec<Notice> {
        log::debug!("Executing {:?}", command);
        match command {
            Command::Extract(path) => self.extract(&path).await,
            Command::Generate => self.generate(),
            Command::List => self.list(),
            Command::Show(id) => recover("Failed to show palette", self.show(id)),
            Command::Delete(id) => recover("Failed to delete palette", self.delete(id)),
            Command::Export { id, dir } => {
                recover("Failed to export palette", self.export(id, &dir).await)
            }
            Command::Copy { id, index, format } => {
                recover("Failed to copy", self.copy(id, index, format))
            }
            Command::Compress(files) => self.compress(&files).await,
            Command::SaveCompressed(dir) => {
                recover("Failed to save images", self.save_compressed(&dir).await)
            }
            Command::ClearCompressed => self.clear_compressed(),
            Command::Arrange { layout, files, out } => recover(
                "Failed to process image",
                self.arrange(layout, &files, &out).await,
            ),
            Command::QrEncode { text, out } => {
                recover("Error generating QR code", self.qr_encode(&text, &out).await)
            }
            Command::QrScan(path) => recover("Failed to scan image", self.qr_scan(&path).await),
            Command::CopyScan => recover("Failed to copy", self.copy_scan()),
            Command::Flip => self.flip(),
            Command::CoinStats => self.coin_stats(),
            Command::CoinReset => {
                self.coin.reset();
                vec![Notice::success("Statistics reset!")]
            }
            Command::Help => vec![Notice::info(HELP)],
            Command::Quit => vec![Notice::info("Goodbye")],
        }
    }

    async fn extract(&mut self, path: &Path) -> Vec<Notice> {
        let extraction = match extract_file(path, &self.config.extraction).await {
            Ok(extraction) => extraction,
            Err(e) => return vec![Notice::from_error("Failed to extract colors from image", &e)],
        };

        if extraction.colors.is_empty() {
            return vec![Notice::info(format!(
                "No opaque colors found in {}",
                extraction.file_name
            ))];
        }

        match self
            .palettes
            .add_extracted(&extraction.file_name, extraction.colors)
        {
            Ok(palette) => {
                log::info!("Extracted palette {} from {}", palette.id(), extraction.file_name);
                vec![
                    Notice::success("Color palette extracted successfully!"),
                    Notice::info(summary(palette)),
                ]
            }
            Err(e) => vec![Notice::from_error("Failed to extract colors from image", &e)],
        }
    }

    fn generate(&mut self) -> Vec<Notice> {
        let colors = generate_palette_colors(&self.config.generation);
        match self.palettes.add_generated(colors) {
            Ok(palette) => vec![
                Notice::success("Random palette generated!"),
                Notice::info(summary(palette)),
            ],
            Err(e) => vec![Notice::from_error("Failed to generate palette", &e)],
        }
    }

    fn list(&self) -> Vec<Notice> {
        if self.palettes.is_empty() {
            return vec![Notice::info("No palettes yet")];
        }
        self.palettes.iter().map(|p| Notice::info(summary(p))).collect()
    }

    fn show(&self, id: PaletteId) -> Result<Vec<Notice>> {
        let palette = self.palettes.get(id)?;
        let mut notices = vec![Notice::info(format!("{} ({})", palette.name(), palette.source()))];
        notices.extend(palette.colors().iter().enumerate().map(|(i, color)| {
            Notice::info(format!(
                "{}: {}  {}  {}  {}",
                i,
                color.hex(),
                color.rgb.to_css(),
                color.hsl.to_css(),
                color.name
            ))
        }));
        Ok(notices)
    }

    fn delete(&mut self, id: PaletteId) -> Result<Vec<Notice>> {
        let removed = self.palettes.delete(id)?;
        log::info!("Deleted palette {} '{}'", id, removed.name());
        Ok(vec![Notice::success("Palette deleted")])
    }

    async fn export(&self, id: PaletteId, dir: &Path) -> Result<Vec<Notice>> {
        let palette = self.palettes.get(id)?;
        let json = export_json(palette)?;
        let path = dir.join(export_file_name(palette));
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write {}", path.display()), e))?;

        log::info!("Exported palette {} to {}", id, path.display());
        Ok(vec![Notice::success(format!(
            "Palette exported! ({})",
            path.display()
        ))])
    }

    fn copy(&mut self, id: PaletteId, index: usize, format: ColorFormat) -> Result<Vec<Notice>> {
        let color = self.palettes.get(id)?.color(index)?;
        let text = copy_color(&mut self.clipboard, color, format)?;
        Ok(vec![Notice::success(format!(
            "{} copied to clipboard! ({})",
            format.label(),
            text
        ))])
    }

    async fn compress(&mut self, files: &[PathBuf]) -> Vec<Notice> {
        let mut notices = vec![Notice::info("Compressing images...")];
        let mut done = 0;

        for path in files {
            match compress_file(path, &self.config.compression).await {
                Ok(image) => {
                    notices.push(Notice::info(format!(
                        "{}: {} -> {} ({}% smaller)",
                        image.original_name,
                        format_file_size(image.original_size),
                        format_file_size(image.compressed_size),
                        image.compression_ratio
                    )));
                    self.compressed.push(image);
                    done += 1;
                }
                Err(e) => {
                    let context = format!("Failed to compress {}", display_name(path));
                    notices.push(Notice::from_error(&context, &e));
                }
            }
        }

        if done == 0 {
            notices.push(Notice::error("Failed to compress images"));
        } else {
            notices.push(Notice::success(format!(
                "Successfully compressed {} image(s)",
                done
            )));
        }
        notices
    }

    async fn save_compressed(&self, dir: &Path) -> Result<Vec<Notice>> {
        if self.compressed.is_empty() {
            return Ok(vec![Notice::info("No compressed images to save")]);
        }
        for image in &self.compressed {
            let path = image.save_to(dir).await?;
            log::debug!("Saved {}", path.display());
        }
        Ok(vec![Notice::success(format!(
            "{} image(s) saved to {}",
            self.compressed.len(),
            dir.display()
        ))])
    }

    fn clear_compressed(&mut self) -> Vec<Notice> {
        let released = self.compressed.len();
        self.compressed.clear();
        log::debug!("Released {} compressed images", released);
        vec![Notice::info("All images cleared")]
    }

    async fn arrange(
        &self,
        layout: Layout,
        files: &[ArrangeSource],
        out: &Path,
    ) -> Result<Vec<Notice>> {
        let canvas = arrange_files(files, layout, &self.config.arrangement).await?;
        let bytes = arrange::encode_png(&canvas)?;

        let path = out.join(arrange::output_file_name(unix_millis()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write {}", path.display()), e))?;

        Ok(vec![Notice::success(format!(
            "Image downloaded successfully! ({})",
            path.display()
        ))])
    }

    async fn qr_encode(&self, text: &str, out: &Path) -> Result<Vec<Notice>> {
        let bytes = qr::encode_png(&qr::encode(text)?)?;
        let path = out.join(qr::output_file_name(unix_millis()));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ToolError::io(format!("Failed to write {}", path.display()), e))?;

        log::info!("Wrote QR code for {} bytes to {}", text.len(), path.display());
        Ok(vec![Notice::success(format!(
            "QR code generated successfully! ({})",
            path.display()
        ))])
    }

    async fn qr_scan(&mut self, path: &Path) -> Result<Vec<Notice>> {
        let content = qr::scan_file(path).await?;
        let notices = vec![
            Notice::success("QR Code detected in image!"),
            Notice::info(content.clone()),
        ];
        self.last_scan = Some(content);
        Ok(notices)
    }

    fn copy_scan(&mut self) -> Result<Vec<Notice>> {
        let Some(content) = self.last_scan.as_deref() else {
            return Ok(vec![Notice::info("Nothing scanned yet")]);
        };
        self.clipboard.write_text(content)?;
        Ok(vec![Notice::success("Copied to clipboard!")])
    }

    fn flip(&mut self) -> Vec<Notice> {
        let side = self.coin.flip();
        vec![Notice::success(format!("It's {}!", side))]
    }

    fn coin_stats(&self) -> Vec<Notice> {
        let (Some(heads), Some(tails)) = (self.coin.heads_percentage(), self.coin.tails_percentage())
        else {
            return vec![Notice::info("No flips yet")];
        };

        let history: Vec<String> = self.coin.history().map(|side| side.to_string()).collect();
        vec![
            Notice::info(format!(
                "Flips: {}, heads: {} ({:.1}%), tails: {} ({:.1}%)",
                self.coin.total(),
                self.coin.heads(),
                heads,
                self.coin.tails(),
                tails
            )),
            Notice::info(format!("Recent: {}", history.join(" "))),
        ]
    }
}

impl<C: Clipboard> Drop for Session<C> {
    fn drop(&mut self) {
        let palettes = self.palettes.clear();
        log::info!(
            "Session ended, released {} palettes and {} compressed images",
            palettes,
            self.compressed.len()
        );
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

fn recover(context: &str, outcome: Result<Vec<Notice>>) -> Vec<Notice> {
    outcome.unwrap_or_else(|e| vec![Notice::from_error(context, &e)])
}

fn summary(palette: &Palette) -> String {
    let hexes: Vec<String> = palette.colors().iter().map(|c| c.hex()).collect();
    format!(
        "{}: {} [{}] {}",
        palette.id(),
        palette.name(),
        palette.source(),
        hexes.join(" ")
    )
}
