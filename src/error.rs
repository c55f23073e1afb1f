//! Spellbook loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or parse a spellbook document.
#[derive(Debug, Error)]
pub enum SpellbookError {
    #[error("failed to read spellbook {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid spellbook YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}
