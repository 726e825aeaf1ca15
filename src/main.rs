//! House Haunters main entry point.
//!
//! A split-screen haunted house game for one to four gamepads, built on:
//! - **bevy_ecs** for the world holding entities and shared resources
//! - an event bus with immediate and queued dispatch between screens
//! - a platform seam; this binary drives the headless backend
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (missing file keeps defaults), apply CLI overrides
//! 2. Load the gamepad input script (built-in demo unless given)
//! 3. Build the engine, register the four screens, enter the title screen
//! 4. Run until the frame budget is spent or a screen requests quit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600 --time-per-phase 2 --seed 7
//! ```

use std::path::PathBuf;

use clap::Parser;
use haunt_engine::engine::GameEngine;
use haunt_engine::engine::platform::{HeadlessPlatform, InputScript};
use haunt_engine::game;
use haunt_engine::resources::gameconfig::GameConfig;
use log::{error, info, warn};

/// Input timeline replayed when no script is given.
const DEMO_INPUT: &str = include_str!("../resources/demo_input.json");

/// House Haunters
#[derive(Parser)]
#[command(version, about = "Split-screen ghost hunting for up to four players.")]
struct Cli {
    /// Configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Frames to run before closing (default: until the script ends, plus two seconds).
    #[arg(long)]
    frames: Option<u64>,

    /// Seconds each gameplay phase lasts.
    #[arg(long, value_name = "SECONDS")]
    time_per_phase: Option<f32>,

    /// Seed for house layout, clues and villain placement.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON gamepad timeline to replay.
    #[arg(long, value_name = "PATH")]
    input_script: Option<PathBuf>,

    /// Start with the debug overlay on.
    #[arg(long)]
    debug: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(tpp) = self.time_per_phase {
            config.time_per_phase = tpp;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.debug {
            config.debug = true;
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    cli.apply(&mut config);

    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        println!("Config written to {}", config.config_path.display());
        return;
    }

    let script = match &cli.input_script {
        Some(path) => InputScript::load(path),
        None => InputScript::parse(DEMO_INPUT),
    };
    let script = match script {
        Ok(script) => script,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let frames = cli
        .frames
        .unwrap_or_else(|| script.last_frame().map_or(600, |f| f + 2 * config.target_fps as u64));
    let platform = HeadlessPlatform::new(frames, config.frame_step()).with_script(script);
    let seed = config.seed;

    info!("Hello! This is House Haunters, running {} headless frames", frames);
    let mut engine = GameEngine::new("House Haunters", platform, config);
    game::register_screens(&mut engine, seed);

    let result = engine
        .change_game_screen(game::TITLE)
        .and_then(|_| engine.start());
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
    info!(
        "ran {} frames, {} audio commands played",
        engine.platform().frames_run(),
        engine.platform().audio_log().len()
    );
}
