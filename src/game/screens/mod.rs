//! Screens of the game.
//!
//! - [`title`] – waits for the first player to press START
//! - [`character`] – players join and pick their characters
//! - [`gameplay`] – the hunt: rooms, clues, phases and the villain
//! - [`gameend`] – outcome, then back to the title
pub mod character;
pub mod gameend;
pub mod gameplay;
pub mod title;
