//! Rainyard
//!
//! Night-time rain viewer.

use anyhow::{Context, Result};
use clap::Parser;
use rainyard_app::windowed::WindowedApp;
use rainyard_runtime::{RainyardConfig, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rainyard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rain falling over a foggy night yard", long_about = None)]
struct Cli {
    /// Config file (defaults to ./rainyard.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the rain, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rain particles
    #[arg(long)]
    particles: Option<usize>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<RainyardConfig> {
    let mut config = match &cli.config {
        Some(path) => RainyardConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RainyardConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))
            .context("Failed to load default config")?,
    };

    if let Some(seed) = cli.seed {
        config.rain.seed = Some(seed);
    }
    if let Some(count) = cli.particles {
        config.rain.count = count;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Targets match by prefix, so `rainyard` covers every rainyard_* crate.
    // RUST_LOG wins over the defaults.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("rainyard=debug,wgpu=warn")
        } else {
            EnvFilter::new("rainyard=info,wgpu=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    tracing::info!(
        "Rainyard {}: {} particles, {}x{} window",
        env!("CARGO_PKG_VERSION"),
        config.rain.count,
        config.window.width,
        config.window.height
    );

    WindowedApp::run(config).context("Viewer stopped")
}
