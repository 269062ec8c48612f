// Copyright (c) 2026 rezky_nightky

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeError {
    /// Raw input mode is unavailable (not a terminal, unsupported platform).
    /// Callers should skip the animation altogether.
    #[error("failed to enter raw terminal mode: {0}")]
    RawMode(#[source] io::Error),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CascadeError>;
