//! System clipboard through the platform's copy utility

use std::io::Write;
use std::process::{Child, Command, Stdio};

use prism_core::clipboard::Clipboard;
use prism_core::{Result, ToolError};

/// Copy programs tried in order; the first one that runs wins
const COPY_PROGRAMS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    fn pipe_into(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        feed_child(&mut child, text)
    }
}

/// Write `text` to the child's stdin, then always wait for it to exit
fn feed_child(child: &mut Child, text: &str) -> std::io::Result<bool> {
    let written = match child.stdin.take() {
        // stdin is dropped at the end of this arm so the child sees EOF
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait()?;
    written?;
    Ok(status.success())
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        for (program, args) in COPY_PROGRAMS {
            match Self::pipe_into(program, args, text) {
                Ok(true) => {
                    log::debug!("Clipboard written with {}", program);
                    return Ok(());
                }
                Ok(false) => log::debug!("{} exited with an error", program),
                Err(e) => log::debug!("{} unavailable: {}", program, e),
            }
        }
        Err(ToolError::ClipboardDenied {
            message: "no clipboard program accepted the text".to_string(),
        })
    }
}
