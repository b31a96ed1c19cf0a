//! Speech engine abstraction
//!
//! The speak operation talks to the host TTS system only through the
//! [`Engine`] trait, so a session can be backed by the platform engine or by
//! a recording fake in tests.

use crate::Result;
use std::fmt;

/// One installed voice as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    /// Engine-specific identifier, passed back through [`Property::Voice`]
    pub id: String,

    /// Human-readable voice name
    pub name: String,

    /// Language tags associated with the voice, most descriptive first
    pub languages: Vec<String>,
}

impl VoiceDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, languages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            languages,
        }
    }

    /// First language tag, if the engine reported any
    pub fn primary_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

impl fmt::Display for VoiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.name, self.id, self.languages.join(", "))
    }
}

/// Synthesis property applied to an engine session
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// Select the voice with this id
    Voice(String),
    /// Speech rate in words per minute
    Rate(f32),
    /// Volume on a 0.0-1.0 scale
    Volume(f32),
}

impl Property {
    /// Property name as the engine knows it
    pub fn name(&self) -> &'static str {
        match self {
            Property::Voice(_) => "voice",
            Property::Rate(_) => "rate",
            Property::Volume(_) => "volume",
        }
    }
}

/// A live session with a speech engine
///
/// A session is acquired for one speak operation and released when dropped.
pub trait Engine {
    /// List installed voices in the engine's own order
    fn list_voices(&self) -> Result<Vec<VoiceDescriptor>>;

    /// Apply a synthesis property
    fn set_property(&mut self, property: Property) -> Result<()>;

    /// Submit text for synthesis
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Block until all submitted text has been played
    fn wait_until_done(&mut self) -> Result<()>;
}
