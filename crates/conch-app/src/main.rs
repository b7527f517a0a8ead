//! conch interactive entry point.
//!
//! Reads commands from stdin until `exit` or end of input. An optional
//! TOML config is taken from the first CLI argument or `CONCH_CONFIG`.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use conch_terminal::{BufLineReader, CommandRegistry, LogSink, Shell, register_builtins};
use conch_types::config::ShellConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CONCH_CONFIG").ok())
        .map(PathBuf::from);
    let config = match &config_path {
        Some(path) => ShellConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ShellConfig::default(),
    };

    let mut registry = CommandRegistry::new();
    register_builtins(&mut registry)?;
    log::info!(
        "Starting conch ({} commands in {} groups)",
        registry.command_count(),
        registry.groups().len(),
    );

    let mut shell = Shell::new(registry, config)?;
    let mut reader = BufLineReader::new(io::stdin().lock());
    let mut out = io::stdout().lock();
    let mut diagnostics = LogSink::default();
    shell.run(&mut reader, &mut out, &mut diagnostics)?;

    log::info!("conch exited");
    Ok(())
}
