//! Speech synthesis system

pub mod backends;
pub mod engine;
pub mod settings;
pub mod speaker;

pub use engine::{Engine, Property, VoiceDescriptor};
pub use settings::SpeechSettings;
pub use speaker::{select_voice, speak, speak_with, SpeakOutcome, Speaker};
