//! Engine error type.
//!
//! Configuration mistakes (an unknown screen id) are fatal: the frame loop
//! stops and the error is handed back to the caller. Lookup misses are not
//! errors and are modelled with `Option` at the call sites.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A screen change named an id that was never registered.
    #[error("unknown game screen '{0}'")]
    UnknownScreen(String),

    /// The frame loop was started without an active screen.
    #[error("no active game screen")]
    NoActiveScreen,

    #[error("failed to load asset {path:?}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read clue data {path:?}: {source}")]
    ClueDataIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid clue data {path:?}: {source}")]
    ClueDataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid input script: {0}")]
    InputScript(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
