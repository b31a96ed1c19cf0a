//! Fixed speech settings applied to every session

/// Speech rate used for every utterance, in words per minute
pub const DEFAULT_RATE_WPM: f32 = 150.0;

/// Full volume
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Substring looked for in a voice's first language tag
pub const DEFAULT_VOICE_HINT: &str = "chinese";

/// Settings a speak operation applies to its engine session
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechSettings {
    /// Rate in words per minute
    pub rate_wpm: f32,

    /// Volume (0.0-1.0)
    pub volume: f32,

    /// Case-insensitive substring matched against the first language tag
    pub voice_hint: String,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate_wpm: DEFAULT_RATE_WPM,
            volume: DEFAULT_VOLUME,
            voice_hint: DEFAULT_VOICE_HINT.to_string(),
        }
    }
}
