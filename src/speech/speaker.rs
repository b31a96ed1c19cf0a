//! The speak operation
//!
//! One call acquires an engine session, picks a voice, applies the fixed
//! rate and volume, and blocks until the text has been played. Failures never
//! propagate out: they are reported as a single `Error: ...` line and a
//! `false` result.

use super::backends::native::NativeEngine;
use super::engine::{Engine, Property, VoiceDescriptor};
use super::settings::SpeechSettings;
use crate::{Result, ZhsayError};
use log::{debug, info};
use std::io::{self, Write};

/// Terminal state of a speak operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Text was submitted and playback completed
    Done,
    /// Some stage failed; the error line has been written
    Failed,
}

impl SpeakOutcome {
    pub fn succeeded(self) -> bool {
        self == SpeakOutcome::Done
    }
}

/// Pick the first voice whose first language tag contains `hint`
///
/// Matching is case-insensitive and looks only at the first tag. Voices
/// without tags are skipped. The scan stops at the first match.
pub fn select_voice<'a>(voices: &'a [VoiceDescriptor], hint: &str) -> Option<&'a VoiceDescriptor> {
    let hint = hint.to_lowercase();
    voices.iter().find(|voice| {
        voice
            .primary_language()
            .map(|lang| lang.to_lowercase().contains(&hint))
            .unwrap_or(false)
    })
}

/// An engine session bound to the settings it will be configured with
pub struct Speaker<E: Engine> {
    engine: E,
    settings: SpeechSettings,
}

impl<E: Engine> Speaker<E> {
    pub fn new(engine: E, settings: SpeechSettings) -> Self {
        Self { engine, settings }
    }

    /// Select a voice and apply rate and volume
    ///
    /// Returns the id of the selected voice, or `None` when the engine
    /// default was kept.
    pub fn configure(&mut self) -> Result<Option<String>> {
        let voices = self.engine.list_voices()?;
        debug!("Engine reports {} voices", voices.len());

        let selected = select_voice(&voices, &self.settings.voice_hint).map(|v| v.id.clone());
        match &selected {
            Some(id) => {
                info!("Using voice {}", id);
                self.engine.set_property(Property::Voice(id.clone()))?;
            }
            None => info!(
                "No voice matches '{}', keeping engine default",
                self.settings.voice_hint
            ),
        }

        self.engine.set_property(Property::Rate(self.settings.rate_wpm))?;
        self.engine.set_property(Property::Volume(self.settings.volume))?;

        Ok(selected)
    }

    /// Submit text and block until playback completes
    pub fn play(&mut self, text: &str) -> Result<()> {
        debug!("Speaking {} chars", text.chars().count());
        self.engine.speak(text)?;
        self.engine.wait_until_done()
    }

    /// Configure the session, speak `text`, and release the session
    pub fn run(mut self, text: &str, err_sink: &mut dyn Write) -> SpeakOutcome {
        let result = self.configure().and_then(|_| self.play(text));
        match result {
            Ok(()) => SpeakOutcome::Done,
            Err(e) => report_failure(&e, err_sink),
        }
    }
}

/// Speak `text` on the platform engine, reporting failure on stderr
pub fn speak(text: &str) -> bool {
    let stderr = io::stderr();
    let mut sink = stderr.lock();
    speak_with(NativeEngine::new, text, &SpeechSettings::default(), &mut sink)
}

/// Speak `text` on a session produced by `factory`
///
/// The session lives only for this call. Any error, including failure to
/// create the session, writes one `Error: <message>` line to `err_sink` and
/// yields `false`.
pub fn speak_with<E, F>(
    factory: F,
    text: &str,
    settings: &SpeechSettings,
    err_sink: &mut dyn Write,
) -> bool
where
    E: Engine,
    F: FnOnce() -> Result<E>,
{
    let outcome = match factory() {
        Ok(engine) => Speaker::new(engine, settings.clone()).run(text, err_sink),
        Err(e) => report_failure(&e, err_sink),
    };
    outcome.succeeded()
}

fn report_failure(error: &ZhsayError, err_sink: &mut dyn Write) -> SpeakOutcome {
    debug!("Speak failed at {} stage: {:?}", error.stage(), error);
    // Keep the report on one line even if the engine message spans several
    let message = error.to_string().replace(['\r', '\n'], " ");
    if let Err(e) = writeln!(err_sink, "Error: {}", message) {
        debug!("Could not write error report: {}", e);
    }
    SpeakOutcome::Failed
}
