//! Line commands understood by the session shell

use std::path::PathBuf;

use prism_core::{ColorFormat, PaletteId, Result, ToolError};
use prism_image::{ArrangeSource, Layout};

pub const HELP: &str = "\
Commands:
  extract <file>                        extract a palette from an image
  generate                              generate a random palette
  list                                  list palettes, newest first
  show <id>                             show the colors of a palette
  delete <id>                           delete a palette
  export <id> [dir]                     write a palette as JSON
  copy <id> <index> [hex|rgb|hsl]       copy one color to the clipboard
  compress <file>...                    compress images to JPEG
  save-compressed [dir]                 write compressed images
  clear-compressed                      forget compressed images
  arrange <horizontal|vertical|grid> <file>... [--out <dir>]
                                        combine images into one PNG;
                                        <file>@x,y,w,h crops a file first
  qr-encode <text>... [--out <dir>]     render text as a QR code PNG
  qr-scan <file>                        read a QR code from an image
  copy-scan                             copy the last scanned text
  flip                                  flip a coin
  coin-stats                            show coin flip statistics
  coin-reset                            reset coin flip statistics
  help                                  show this text
  quit                                  end the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Extract(PathBuf),
    Generate,
    List,
    Show(PaletteId),
    Delete(PaletteId),
    Export { id: PaletteId, dir: PathBuf },
    Copy { id: PaletteId, index: usize, format: ColorFormat },
    Compress(Vec<PathBuf>),
    SaveCompressed(PathBuf),
    ClearCompressed,
    Arrange { layout: Layout, files: Vec<ArrangeSource>, out: PathBuf },
    QrEncode { text: String, out: PathBuf },
    QrScan(PathBuf),
    CopyScan,
    Flip,
    CoinStats,
    CoinReset,
    Help,
    Quit,
}

fn usage(text: &str) -> ToolError {
    ToolError::input_rejected(format!("Usage: {}", text))
}

fn current_dir(arg: Option<&str>) -> PathBuf {
    PathBuf::from(arg.unwrap_or("."))
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("extract", [file]) => Command::Extract(PathBuf::from(file)),
            ("extract", _) => return Err(usage("extract <file>")),
            ("generate", []) => Command::Generate,
            ("list", []) => Command::List,
            ("show", [id]) => Command::Show(id.parse()?),
            ("show", _) => return Err(usage("show <id>")),
            ("delete", [id]) => Command::Delete(id.parse()?),
            ("delete", _) => return Err(usage("delete <id>")),
            ("export", [id, rest @ ..]) if rest.len() <= 1 => Command::Export {
                id: id.parse()?,
                dir: current_dir(rest.first().copied()),
            },
            ("export", _) => return Err(usage("export <id> [dir]")),
            ("copy", [id, index, rest @ ..]) if rest.len() <= 1 => Command::Copy {
                id: id.parse()?,
                index: index
                    .parse()
                    .map_err(|_| ToolError::invalid_parameter("color index", index))?,
                format: rest.first().map_or(Ok(ColorFormat::Hex), |f| f.parse())?,
            },
            ("copy", _) => return Err(usage("copy <id> <index> [hex|rgb|hsl]")),
            ("compress", files) if !files.is_empty() => {
                Command::Compress(files.iter().map(PathBuf::from).collect())
            }
            ("compress", _) => return Err(usage("compress <file>...")),
            ("save-compressed", rest) if rest.len() <= 1 => {
                Command::SaveCompressed(current_dir(rest.first().copied()))
            }
            ("clear-compressed", []) => Command::ClearCompressed,
            ("arrange", [layout, rest @ ..]) => Self::parse_arrange(layout, rest)?,
            ("qr-encode", words) if !words.is_empty() => Self::parse_qr_encode(words)?,
            ("qr-encode", _) => return Err(usage("qr-encode <text>... [--out <dir>]")),
            ("qr-scan", [file]) => Command::QrScan(PathBuf::from(file)),
            ("qr-scan", _) => return Err(usage("qr-scan <file>")),
            ("copy-scan", []) => Command::CopyScan,
            ("flip", []) => Command::Flip,
            ("coin-stats", []) => Command::CoinStats,
            ("coin-reset", []) => Command::CoinReset,
            ("help", _) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            (
                name @ ("generate" | "list" | "save-compressed" | "clear-compressed" | "arrange"
                | "copy-scan" | "flip" | "coin-stats" | "coin-reset" | "quit" | "exit"),
                _,
            ) => {
                return Err(ToolError::input_rejected(format!(
                    "Unexpected arguments for '{}'. Type 'help' for usage.",
                    name
                )))
            }
            (other, _) => {
                return Err(ToolError::input_rejected(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    other
                )))
            }
        };
        Ok(Some(command))
    }

    fn parse_qr_encode(words: &[&str]) -> Result<Command> {
        let (text, out) = match words {
            [text @ .., "--out", dir] => (text, PathBuf::from(dir)),
            text => (text, PathBuf::from(".")),
        };
        if text.is_empty() || text.contains(&"--out") {
            return Err(usage("qr-encode <text>... [--out <dir>]"));
        }
        Ok(Command::QrEncode {
            text: text.join(" "),
            out,
        })
    }

    fn parse_arrange(layout: &str, rest: &[&str]) -> Result<Command> {
        let layout: Layout = layout.parse()?;
        let mut files = Vec::new();
        let mut out = None;
        let mut iter = rest.iter();
        while let Some(arg) = iter.next() {
            if *arg == "--out" {
                let dir = iter
                    .next()
                    .ok_or_else(|| usage("arrange <layout> <file>... [--out <dir>]"))?;
                out = Some(PathBuf::from(dir));
            } else {
                files.push(arg.parse()?);
            }
        }
        // An empty file list is reported by the arranger itself
        Ok(Command::Arrange {
            layout,
            files,
            out: out.unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
