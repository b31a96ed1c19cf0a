//! Error types for zhsay

use std::io;
use thiserror::Error;

/// Main error type for zhsay
///
/// Each variant names the stage of a speak operation that failed.
#[derive(Error, Debug)]
pub enum ZhsayError {
    #[error("Failed to initialize speech engine: {0}")]
    Init(String),

    #[error("Failed to configure speech engine: {0}")]
    Config(String),

    #[error("Speech playback failed: {0}")]
    Playback(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for zhsay operations
pub type Result<T> = std::result::Result<T, ZhsayError>;

impl ZhsayError {
    /// Short name of the failing stage, used in debug logs
    pub fn stage(&self) -> &'static str {
        match self {
            ZhsayError::Init(_) => "init",
            ZhsayError::Config(_) => "config",
            ZhsayError::Playback(_) => "playback",
            ZhsayError::Io(_) => "io",
        }
    }
}
