mod cli;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use prism_core::load_scene;
use prism_renderer::{demo_scene_description, render, save_image, RenderConfig, SceneBuilder};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    let mut description = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No scene file given, rendering the demo scene");
            demo_scene_description().context("Failed to load the demo scene")?
        }
    };
    args.apply_overrides(&mut description);

    let scene = SceneBuilder::new()
        .build(&description)
        .context("Failed to build scene")?;

    let config = RenderConfig {
        progress_interval: args.progress_interval,
        ..RenderConfig::from(&description.settings)
    };
    let image = render(&scene, &config).context("Render failed")?;

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
