use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use inkpad::surface::MAX_DIMENSION;
use inkpad::{Config, Session, script};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "inkpad")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("INKPAD_GIT_HASH"), ")"),
    about = "Freehand raster drawing surface: replay strokes onto a canvas and export PNG"
)]
struct Cli {
    /// JSON replay script (pointer events and control calls)
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Image to install as the background before the script runs
    #[arg(long, short = 'b', value_name = "IMAGE")]
    background: Option<PathBuf>,

    /// Output PNG path (defaults to the configured export location)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Canvas width override
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    width: Option<u32>,

    /// Canvas height override
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    height: Option<u32>,

    /// Config file to use instead of ~/.config/inkpad/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }

    let mut session = Session::from_config(&config).context("Failed to create canvas")?;
    log::info!(
        "Canvas {}x{}",
        session.surface().width(),
        session.surface().height()
    );

    if let Some(background) = &cli.background {
        if !session.handle_image(background).await {
            log::warn!(
                "Background {} could not be loaded; starting blank",
                background.display()
            );
        }
    }

    if let Some(script_path) = &cli.script {
        let json = fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read script {}", script_path.display()))?;
        let steps = script::parse(&json)
            .with_context(|| format!("Failed to load script {}", script_path.display()))?;
        let base_dir = script_path.parent().unwrap_or_else(|| Path::new("."));
        script::replay(&mut session, &steps, base_dir).await?;
    }

    let output = match cli.output {
        Some(path) => path,
        None => config
            .export
            .directory
            .join(generate_filename(&config.export.filename_template)),
    };
    save_png(&session, &output)?;
    println!("Saved {}", output.display());

    Ok(())
}

/// Expands the chrono template and appends `.png`.
fn generate_filename(template: &str) -> String {
    let mut name = String::new();
    if write!(name, "{}", Local::now().format(template)).is_err() || name.is_empty() {
        log::warn!("Invalid filename template '{}', using 'sketch'", template);
        name = "sketch".to_string();
    }
    name.push_str(".png");
    name
}

fn save_png(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    session
        .surface()
        .write_png(&mut writer)
        .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
