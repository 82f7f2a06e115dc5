use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use raylib::prelude::*;

mod animator;
mod constants;
mod deck;
mod error;
mod image_loader;
mod roulette;
mod state;
mod view;

use crate::constants::*;
use crate::image_loader::{list_image_paths, load_texture_with_exif_rotation};
use crate::roulette::Roulette;
use crate::view::RouletteView;

/// Draws every image of a folder once, in random order, with a roulette flicker.
#[derive(Parser, Debug)]
#[command(name = "picture-roulette", version)]
struct Cli {
    /// Directory holding the images
    #[arg(default_value = DEFAULT_IMAGE_DIR)]
    images: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    // --- Find Images before opening a window ---
    let image_paths = list_image_paths(&cli.images)
        .with_context(|| format!("Cannot start without images from {}", cli.images.display()))?;

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title("Picture Roulette")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Textures ---
    let mut textures = Vec::with_capacity(image_paths.len());
    for path in &image_paths {
        let texture = load_texture_with_exif_rotation(&mut rl, &thread, path)
            .context("Every file in the image directory must be a loadable image")?;
        textures.push(texture);
    }
    info!("Loaded {} images from {}", textures.len(), cli.images.display());

    let roulette = Roulette::new(textures.len())?;
    let mut view = RouletteView::new(textures, roulette);

    // --- Main Loop ---
    while !rl.window_should_close() {
        if !view.frame(&mut rl, &thread)? {
            break;
        }
    }

    info!("Picture Roulette shutting down");
    Ok(())
}
