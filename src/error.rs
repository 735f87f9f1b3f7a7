use std::path::PathBuf;
use thiserror::Error;

/// Startup failures while attaching the UI to the terminal
#[derive(Debug, Error)]
pub enum MountError {
    #[error("stdout is not a terminal; use --print or --json for non-interactive output")]
    NotATerminal,

    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },

    #[error("could not query terminal size: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
