//! CLI binary entry point for the Vizzium debugger console.
//!
//! Usage:
//!   vizzium [OPTIONS] [IMAGE]
//!
//! Options:
//!   -c, --config <FILE>       Path to configuration TOML file
//!   -m, --memory-size <BYTES> Target memory size (overrides config)
//!   -l, --log-file <FILE>     Write logs to FILE (overrides config)
//!   -v, --verbose             Increase logging verbosity

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;

use vizzium_console::config::{parse_size, VizziumConfig};
use vizzium_console::terminal::{install_panic_hook, require_tty};
use vizzium_console::{Console, CrosstermTerminal};
use vizzium_z80::Z80;

/// Vizzium - vi-like debugger console for Z80 binaries.
#[derive(Parser, Debug)]
#[command(name = "vizzium")]
#[command(about = "vi-like debugger console for Z80 binaries")]
#[command(version)]
struct Cli {
    /// Binary image to load at address 0 on startup.
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,

    /// Path to configuration TOML file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target memory size in bytes (decimal or 0x hex, power of two).
    #[arg(short, long, value_name = "BYTES", value_parser = parse_memory_size)]
    memory_size: Option<usize>,

    /// Write logs to this file.
    #[arg(short, long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_memory_size(value: &str) -> Result<usize, String> {
    parse_size(value).ok_or_else(|| format!("invalid size: {value}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration.
    let mut config = VizziumConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides.
    if let Some(size) = cli.memory_size {
        config.target.memory_size = size;
    }
    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }

    // Adjust log level based on verbosity.
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    if let Some(path) = &config.logging.file {
        init_logging(path, log_level)?;
    }

    require_tty()?;

    let target = Z80::new(config.target.memory_size)?;

    tracing::info!(
        memory_size = config.target.memory_size,
        base_address = config.view.base_address,
        "Starting Vizzium"
    );

    install_panic_hook();

    let terminal = CrosstermTerminal::enter(config.view.status_width_percent)?;
    let mut console = Console::new(target, terminal, &config.console_settings())?;

    if let Some(image) = cli.image {
        console.execute(&["load".to_string(), image.display().to_string()]);
    }

    console.run()?;

    Ok(())
}

/// Send logs to `path`. The console owns stdout, so logs never go there.
fn init_logging(path: &Path, level: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Unable to create log file {}", path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
