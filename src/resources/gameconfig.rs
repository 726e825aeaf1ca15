//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 720
//! height = 480
//! target_fps = 60
//!
//! [game]
//! time_per_phase = 30.0
//! seed = 1234
//! clue_data = resources/items.json
//!
//! [debug]
//! enabled = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 720;
const DEFAULT_WINDOW_HEIGHT: u32 = 480;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_TIME_PER_PHASE: f32 = 30.0;
const DEFAULT_DEBUG: bool = false;
const DEFAULT_CLUE_DATA: &str = "resources/items.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second; the headless runner derives its fixed step from it.
    pub target_fps: u32,
    /// Seconds each gameplay phase lasts.
    pub time_per_phase: f32,
    /// Fixed seed for gameplay randomness.
    pub seed: Option<u64>,
    /// Path of the clue item table.
    pub clue_data: PathBuf,
    /// Start with the debug overlay enabled.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            time_per_phase: DEFAULT_TIME_PER_PHASE,
            seed: None,
            clue_data: PathBuf::from(DEFAULT_CLUE_DATA),
            debug: DEFAULT_DEBUG,
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

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }

        // [game] section
        if let Some(secs) = config.getfloat("game", "time_per_phase").ok().flatten() {
            if secs > 0.0 {
                self.time_per_phase = secs as f32;
            }
        }
        if let Some(seed) = config.getuint("game", "seed").ok().flatten() {
            self.seed = Some(seed);
        }
        if let Some(path) = config.get("game", "clue_data") {
            self.clue_data = PathBuf::from(path);
        }

        // [debug] section
        if let Some(enabled) = config.getbool("debug", "enabled").ok().flatten() {
            self.debug = enabled;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, time_per_phase={}s, seed={:?}, debug={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.time_per_phase,
            self.seed,
            self.debug
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set("game", "time_per_phase", Some(self.time_per_phase.to_string()));
        if let Some(seed) = self.seed {
            config.set("game", "seed", Some(seed.to_string()));
        }
        config.set(
            "game",
            "clue_data",
            Some(self.clue_data.to_string_lossy().into_owned()),
        );

        config.set("debug", "enabled", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Fixed frame step derived from the target frame rate.
    pub fn frame_step(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_width, 720);
        assert_eq!(config.window_height, 480);
        assert_eq!(config.time_per_phase, 30.0);
        assert!(config.seed.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_missing_file_is_error_and_keeps_defaults() {
        let mut config = GameConfig::with_path("/definitely/not/here/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.time_per_phase, 30.0);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[game]\ntime_per_phase = 1.5\nseed = 42\n[debug]\nenabled = true").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.time_per_phase, 1.5);
        assert_eq!(config.seed, Some(42));
        assert!(config.debug);
        assert_eq!(config.window_width, 720);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.ini");
        let mut config = GameConfig::with_path(&path);
        config.time_per_phase = 7.0;
        config.target_fps = 30;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.time_per_phase, 7.0);
        assert_eq!(loaded.target_fps, 30);
        assert!((loaded.frame_step() - 1.0 / 30.0).abs() < 1e-6);
    }
}
