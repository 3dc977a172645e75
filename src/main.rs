//! spriteflow demo entry point.
//!
//! Runs the headless demo scene from `spriteflow::game`: a player walking a tile route,
//! a guard switching between patrol and chase, and a coin tile that feeds a
//! score HUD item. Everything that happens is logged.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 600 --seed 7
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use log::warn;
use std::path::PathBuf;

use spriteflow::game;
use spriteflow::resources::config::EngineConfig;

/// spriteflow headless demo
#[derive(Parser)]
#[command(version, about = "Runs the spriteflow demo scene without a window.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate (overrides the config file).
    #[arg(long)]
    frames: Option<u32>,

    /// Seed for the guard's wandering.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Write the effective configuration back to the config file and exit.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Config file not found or invalid, using defaults: {}", e);
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }

    if cli.save_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let mut world = World::new();
    let scene = game::setup(&mut world, &config, cli.seed);
    game::run(&mut world, &config, &scene);
}
