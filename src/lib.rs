//! zhsay - speak text through the system speech engine
//!
//! Takes one line of text, picks a Chinese voice when the engine has one,
//! and plays it back at a fixed rate and full volume.

pub mod cli;
pub mod error;
pub mod speech;

pub use error::{Result, ZhsayError};
pub use speech::{speak, speak_with};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "zhsay";
