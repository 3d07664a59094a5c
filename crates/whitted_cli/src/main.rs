//! `whitted` - render a JSON scene description to an image file.

use anyhow::{Context, Result};
use clap::Parser;

mod cli;

use cli::Args;
use whitted_core::load_scene;
use whitted_renderer::render;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Whitted ray tracer");

    let scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene from {}", args.scene.display()))?;

    let config = args.render_config();
    let rendered = render(&scene, &config).context("Failed to render scene")?;

    rendered
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;

    log::info!("Done");
    Ok(())
}
