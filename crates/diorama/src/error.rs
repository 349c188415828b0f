use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a deck or its collaborators.
///
/// Navigation itself never fails: boundary moves, rejected jumps and stale
/// presenter windows are absorbed where they happen.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("a deck needs at least one slide")]
    EmptyDeck,

    #[error("failed to read deck file {path}: {source}")]
    ReadDeck {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid deck file {path}: {source}")]
    ParseDeck {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid location {0:?}: expected scheme://host[:port][/path]")]
    InvalidLocation(String),

    #[error("unknown key action {0:?}: expected 'left', 'right', 'page up' or 'page down'")]
    UnknownKeyAction(String),
}

pub type Result<T> = std::result::Result<T, DeckError>;
