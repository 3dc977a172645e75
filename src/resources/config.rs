//! Engine configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are safe for
//! startup, so a missing or partial file is never fatal.
//!
//! # Configuration File Format
//!
//! ```ini
//! [tiles]
//! size = 16
//!
//! [movement]
//! arrival_divisor = 30
//!
//! [run]
//! fps = 30
//! frames = 300
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::tilegrid::TileGrid;

/// Default safe values for startup
const DEFAULT_TILE_SIZE: u32 = 16;
const DEFAULT_ARRIVAL_DIVISOR: f32 = 30.0;
const DEFAULT_FPS: u32 = 30;
const DEFAULT_FRAMES: u32 = 300;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Unsigned value of `section.key`, or `None` if it is missing, malformed or
/// does not fit in a `u32`.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    let value = config.getuint(section, key).ok().flatten()?;
    match u32::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring [{}] {} = {}: out of range", section, key, value);
            None
        }
    }
}

/// Engine configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Tile width and height in pixels.
    pub tile_size: u32,
    /// A moving entity stops once it is closer than `speed / arrival_divisor`
    /// pixels to its target.
    pub arrival_divisor: f32,
    /// Fixed simulation rate of the headless runner.
    pub fps: u32,
    /// Number of frames the headless runner simulates.
    pub frames: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            arrival_divisor: DEFAULT_ARRIVAL_DIVISOR,
            fps: DEFAULT_FPS,
            frames: DEFAULT_FRAMES,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [tiles] section
        if let Some(size) = read_u32(&config, "tiles", "size") {
            self.tile_size = size.max(1);
        }

        // [movement] section
        if let Some(divisor) = config.getfloat("movement", "arrival_divisor").ok().flatten() {
            if divisor > 0.0 {
                self.arrival_divisor = divisor as f32;
            }
        }

        // [run] section
        if let Some(fps) = read_u32(&config, "run", "fps") {
            self.fps = fps.max(1);
        }
        if let Some(frames) = read_u32(&config, "run", "frames") {
            self.frames = frames;
        }

        info!(
            "Loaded config: tile_size={}, arrival_divisor={}, fps={}, frames={}",
            self.tile_size, self.arrival_divisor, self.fps, self.frames
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("tiles", "size", Some(self.tile_size.to_string()));
        config.set(
            "movement",
            "arrival_divisor",
            Some(self.arrival_divisor.to_string()),
        );
        config.set("run", "fps", Some(self.fps.to_string()));
        config.set("run", "frames", Some(self.frames.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Seconds per frame at the configured rate.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }

    /// Tile geometry described by this configuration.
    pub fn tile_grid(&self) -> TileGrid {
        TileGrid::new(self.tile_size)
    }
}
