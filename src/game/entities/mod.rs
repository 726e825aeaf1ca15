//! Game objects living in the gameplay entity group.
//!
//! - [`character`] – a player's investigator, driven by its gamepad
//! - [`clue`] – a clue hidden in a room slot
//! - [`villain`] – the ghost released when the hunting phase ends
pub mod character;
pub mod clue;
pub mod villain;
