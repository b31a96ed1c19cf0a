//! Native TTS backend using the tts crate
//!
//! This backend uses the `tts` crate which provides a unified interface to:
//! - Speech Dispatcher on Linux
//! - AVFoundation on macOS/iOS
//! - WinRT / SAPI on Windows
//!
//! `Tts::speak` only queues an utterance. Waiting for playback uses the
//! utterance end/stop callbacks when the backend has them, and otherwise
//! polls `is_speaking`.

use crate::speech::{Engine, Property, VoiceDescriptor};
use crate::{Result, ZhsayError};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use tts::{Tts, UtteranceId, Voice};

/// Words per minute treated as the backend's normal rate
const NORMAL_WPM: f32 = 200.0;

/// Words per minute treated as the backend's maximum rate
const MAX_WPM: f32 = 400.0;

/// Interval between `is_speaking` polls while waiting for playback
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to wait for a queued utterance to start when polling
const START_GRACE: Duration = Duration::from_secs(1);

/// Engine session backed by the platform speech system
pub struct NativeEngine {
    tts: Tts,

    /// Ids of utterances that ended or were stopped, if callbacks are supported
    finished: Option<Receiver<UtteranceId>>,

    /// Set once `speak` has queued text
    submitted: bool,

    /// Id of the last queued utterance, when the backend reports one
    utterance: Option<UtteranceId>,
}

impl NativeEngine {
    /// Initialize the platform-appropriate TTS backend
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = Tts::default().map_err(init_error)?;

        let finished = if tts.supported_features().utterance_callbacks {
            let (end_tx, rx) = mpsc::channel();
            let stop_tx = end_tx.clone();
            tts.on_utterance_end(Some(Box::new(move |id: UtteranceId| {
                let _ = end_tx.send(id);
            })))
            .map_err(init_error)?;
            tts.on_utterance_stop(Some(Box::new(move |id: UtteranceId| {
                let _ = stop_tx.send(id);
            })))
            .map_err(init_error)?;
            Some(rx)
        } else {
            debug!("Utterance callbacks not supported, will poll is_speaking");
            None
        };

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            finished,
            submitted: false,
            utterance: None,
        })
    }

    fn installed_voices(&self) -> Result<Vec<Voice>> {
        if !self.tts.supported_features().voice {
            warn!("Voice selection not supported on this platform");
            return Ok(Vec::new());
        }

        self.tts.voices().map_err(config_error)
    }

    fn set_voice(&mut self, id: &str) -> Result<()> {
        let voice = self
            .installed_voices()?
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| ZhsayError::Config(format!("Unknown voice id: {}", id)))?;

        debug!("Selecting voice: {:?}", voice);
        self.tts.set_voice(&voice).map_err(config_error)
    }

    fn set_rate(&mut self, wpm: f32) -> Result<()> {
        if !self.tts.supported_features().rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        let rate = wpm_to_rate(
            wpm,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        );
        debug!("Setting rate to {} ({} wpm)", rate, wpm);
        self.tts.set_rate(rate).map_err(config_error)?;

        Ok(())
    }

    fn set_volume(&mut self, fraction: f32) -> Result<()> {
        if !self.tts.supported_features().volume {
            warn!("Volume control not supported on this platform");
            return Ok(());
        }

        let volume = fraction_to_volume(fraction, self.tts.min_volume(), self.tts.max_volume());
        debug!("Setting volume to {}", volume);
        self.tts.set_volume(volume).map_err(config_error)?;

        Ok(())
    }
}

impl Engine for NativeEngine {
    fn list_voices(&self) -> Result<Vec<VoiceDescriptor>> {
        Ok(self.installed_voices()?.iter().map(describe_voice).collect())
    }

    fn set_property(&mut self, property: Property) -> Result<()> {
        match property {
            Property::Voice(id) => self.set_voice(&id),
            Property::Rate(wpm) => self.set_rate(wpm),
            Property::Volume(fraction) => self.set_volume(fraction),
        }
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        debug!("Speaking: {}", text);
        self.utterance = self.tts.speak(text, false).map_err(playback_error)?;
        self.submitted = true;

        Ok(())
    }

    fn wait_until_done(&mut self) -> Result<()> {
        if !self.submitted {
            return Ok(());
        }
        self.submitted = false;

        if let (Some(finished), Some(id)) = (&self.finished, self.utterance.take()) {
            debug!("Waiting for utterance {:?} to end", id);
            wait_for_utterance(finished, &id)?;
        } else if self.tts.supported_features().is_speaking {
            let tts = &self.tts;
            wait_for_playback(|| tts.is_speaking().map_err(playback_error), START_GRACE)?;
        } else {
            warn!("Cannot track playback on this platform, not waiting");
            return Ok(());
        }

        debug!("Playback finished");
        Ok(())
    }
}

fn init_error(e: tts::Error) -> ZhsayError {
    ZhsayError::Init(e.to_string())
}

fn config_error(e: tts::Error) -> ZhsayError {
    ZhsayError::Config(e.to_string())
}

fn playback_error(e: tts::Error) -> ZhsayError {
    ZhsayError::Playback(e.to_string())
}

/// Block until `id` arrives on `finished`
///
/// Ids of other utterances are skipped.
pub fn wait_for_utterance<T: PartialEq>(finished: &Receiver<T>, id: &T) -> Result<()> {
    loop {
        let done = finished
            .recv()
            .map_err(|_| ZhsayError::Playback("speech engine stopped reporting progress".into()))?;
        if &done == id {
            return Ok(());
        }
    }
}

/// Poll `is_speaking` until playback has started and then stopped
///
/// Backends flip to speaking asynchronously after an utterance is queued, so
/// an initial `false` does not mean playback is over. If speaking has not
/// been observed within `grace`, the utterance is taken as already finished.
pub fn wait_for_playback<F>(mut is_speaking: F, grace: Duration) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    let started = Instant::now();
    while !is_speaking()? {
        if started.elapsed() >= grace {
            debug!("Playback never reported as started");
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL);
    }

    while is_speaking()? {
        thread::sleep(POLL_INTERVAL);
    }
    Ok(())
}

/// Map words per minute onto a backend rate range
///
/// `NORMAL_WPM` lands on `normal`; slower speeds interpolate toward `min` at
/// zero and faster ones toward `max` at `MAX_WPM`.
pub fn wpm_to_rate(wpm: f32, min: f32, normal: f32, max: f32) -> f32 {
    let wpm = wpm.max(0.0);
    let rate = if wpm <= NORMAL_WPM {
        min + (normal - min) * (wpm / NORMAL_WPM)
    } else {
        normal + (max - normal) * ((wpm - NORMAL_WPM) / (MAX_WPM - NORMAL_WPM))
    };
    rate.clamp(min, max)
}

/// Map a 0.0-1.0 volume onto a backend volume range
pub fn fraction_to_volume(fraction: f32, min: f32, max: f32) -> f32 {
    min + (max - min) * fraction.clamp(0.0, 1.0)
}

fn describe_voice(voice: &Voice) -> VoiceDescriptor {
    let tag = voice.language().to_string();
    let mut languages = Vec::with_capacity(2);
    if let Some(display) = language_display_name(&tag) {
        languages.push(display);
    }
    languages.push(tag);
    VoiceDescriptor::new(voice.id(), voice.name(), languages)
}

/// English display name for a BCP 47 tag, e.g. `zh-CN` -> `Chinese (CN)`
pub fn language_display_name(tag: &str) -> Option<String> {
    let mut parts = tag.split(['-', '_']);
    let primary = parts.next()?.to_lowercase();
    let language = match primary.as_str() {
        "zh" | "cmn" | "yue" => "Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "ko" => "Korean",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "nl" => "Dutch",
        "sv" => "Swedish",
        "pl" => "Polish",
        "tr" => "Turkish",
        "th" => "Thai",
        "vi" => "Vietnamese",
        _ => return None,
    };

    // Region is the first two-letter or three-digit subtag after the language
    let region = parts.find(|p| {
        (p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
            || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
    });

    Some(match region {
        Some(region) => format!("{} ({})", language, region.to_uppercase()),
        None => language.to_string(),
    })
}
