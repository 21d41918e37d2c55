mod clipboard;
mod command;
mod session;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use prism_core::{Notice, ToolsConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::clipboard::SystemClipboard;
use crate::command::Command;
use crate::session::Session;

const CONFIG_ENV: &str = "PRISM_CONFIG";

/// `--config <file>` wins over `PRISM_CONFIG`; neither means defaults
fn config_path() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                return Ok(Some(PathBuf::from(path)));
            }
            other => bail!("Unknown argument '{}'. Usage: prism [--config <file.json>]", other),
        }
    }
    Ok(std::env::var_os(CONFIG_ENV).map(PathBuf::from))
}

fn load_config() -> Result<ToolsConfig> {
    match config_path()? {
        Some(path) => ToolsConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ToolsConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut session = Session::new(config, SystemClipboard::new())?;
    log::info!("Session started");
    println!("prism mini-tools. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", Notice::from_error("Invalid command", &e));
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        for notice in session.execute(command).await {
            println!("{}", notice);
        }
    }

    Ok(())
}
