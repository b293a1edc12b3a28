use std::path::Path;

use anyhow::{Context, Result};
use ascii_grid::{RenderConfig, preprocess, render};
use clap::Parser;

pub mod cli;

fn main() -> Result<()> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Config: defaults < file < flags
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => RenderConfig::default(),
    };
    cli.apply(&mut config);
    config.validate().context("invalid render settings")?;
    log::debug!("{:?}", config);

    // 4. Decode and shrink to one pixel per cell
    let input = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?
        .to_rgba8();
    log::info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        input.width(),
        input.height()
    );
    let cells = preprocess::prepare(&input, config.ascii_width, cli.blur)?;

    // 5. Render
    let grid = render(&cells, &config)?;
    let text = grid.to_text();

    match cli.output.as_deref() {
        Some(path) => {
            std::fs::write(path, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}x{} grid to {}", grid.width(), grid.height(), path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

/// Read a TOML render config. Missing keys keep their defaults.
fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: RenderConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse TOML in {}", path.display()))?;
    Ok(config)
}
