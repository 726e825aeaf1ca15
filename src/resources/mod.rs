//! Resources stored in the world.
//!
//! This module groups the long-lived data the engine keeps in its
//! `bevy_ecs::World` and hands to screens and entities: the event bus,
//! session and configuration, timing, input, audio and asset handles, and
//! the external data sources of the game.
//!
//! Overview
//! - `assets` – texture/sound/font cache keyed by path
//! - `audio` – channel carrying audio commands to the platform
//! - `cluedata` – clue tiers and the clue text source
//! - `debugmode` – presence toggles the debug overlay
//! - `eventbus` – publish/subscribe registry with immediate and queued dispatch
//! - `gameconfig` – settings loaded from `config.ini`
//! - `input` – gamepad snapshots, edge detection and the per-frame inbox
//! - `roomgrid` – rooms and clue slots of the house
//! - `screenstate` – current screen and pending screen switch
//! - `session` – player roster and character picks
//! - `worldtime` – simulation time and delta
pub mod assets;
pub mod audio;
pub mod cluedata;
pub mod debugmode;
pub mod eventbus;
pub mod gameconfig;
pub mod input;
pub mod roomgrid;
pub mod screenstate;
pub mod session;
pub mod worldtime;
