use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use ember2d::{
    config::SceneConfig,
    systems::{MovementSystem, RenderSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "ember2d scene runner")]
struct Cli {
    /// Path to the scene YAML file
    #[arg(long, default_value = "scenes/demo.yaml")]
    scene: PathBuf,

    /// Override frame count (uses the scene default when omitted)
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let scene = SceneConfig::from_yaml(&cli.scene)?;
    let frames = cli.frames.unwrap_or(scene.frames);

    let mut registry = scene.build_registry();
    registry.add_system(MovementSystem::new());
    registry.add_system(RenderSystem::new());

    for _ in 0..frames {
        registry.update();
        MovementSystem::run(&mut registry, scene.dt_seconds)?;
        RenderSystem::run(&registry)?;
    }

    println!(
        "Scene '{}' ran for {} frames over {} entities.",
        scene.name,
        frames,
        registry.entity_count()
    );
    Ok(())
}
