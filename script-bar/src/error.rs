//! Error types for the I/O boundaries
//!
//! None of these cross into the reconciler: manifest and store errors are
//! collapsed to empty defaults where they are read, launch errors become
//! notifications.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no terminal emulator could be started ({})", attempts.join("; "))]
    NoTerminal { attempts: Vec<String> },
}
