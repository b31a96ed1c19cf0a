//! Platform speech backends

// Native TTS backend using the tts crate (cross-platform)
pub mod native;

pub use native::NativeEngine;
