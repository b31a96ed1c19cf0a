//! Command line parsing and dispatch
//!
//! The surface is small enough that arguments are matched by hand: a few
//! flags and one positional text argument.

use crate::speech::{speak_with, Engine, SpeechSettings};
use crate::Result;
use log::{debug, info};
use std::io::Write;

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Speak this text
    Speak(String),
    /// Print installed voices
    ListVoices,
    /// Print usage
    Help,
    /// Print version
    Version,
    /// Nothing to do
    Idle,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Write debug logs to the log file
    pub debug: bool,
    pub command: Command,
}

impl Cli {
    /// Parse arguments, excluding the program name
    ///
    /// The first positional argument is the text; later ones are ignored.
    /// Arguments that look like flags but aren't known ones are taken as text,
    /// so `zhsay -5` speaks "-5".
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut debug = false;
        let mut list_voices = false;
        let mut help = false;
        let mut version = false;
        let mut text = None;
        let mut options_done = false;

        for arg in args {
            let arg = arg.into();
            if text.is_some() {
                continue;
            }
            if !options_done {
                match arg.as_str() {
                    "--" => {
                        options_done = true;
                        continue;
                    }
                    "-d" | "--debug" => {
                        debug = true;
                        continue;
                    }
                    "-l" | "--list-voices" => {
                        list_voices = true;
                        continue;
                    }
                    "-h" | "--help" => {
                        help = true;
                        continue;
                    }
                    "-V" | "--version" => {
                        version = true;
                        continue;
                    }
                    _ => {}
                }
            }
            text = Some(arg);
        }

        let command = if help {
            Command::Help
        } else if version {
            Command::Version
        } else if list_voices {
            Command::ListVoices
        } else {
            text.map(Command::Speak).unwrap_or(Command::Idle)
        };

        Self { debug, command }
    }
}

/// Usage text for `--help`
pub fn usage() -> String {
    format!(
        "Usage: {name} [OPTIONS] <TEXT>\n\
         \n\
         Speak TEXT through the system speech engine, using a Chinese voice\n\
         when one is installed.\n\
         \n\
         Options:\n\
         \x20 -l, --list-voices  List installed voices and exit\n\
         \x20 -d, --debug        Write debug logs to {name}.log\n\
         \x20 -h, --help         Print this help\n\
         \x20 -V, --version      Print version\n",
        name = crate::APP_NAME
    )
}

/// Carry out `command`, creating an engine session with `factory` if needed
///
/// Speaking never fails here: its outcome goes to `err` as an `Error:` line.
/// Only listing voices and writing to `out` can return an error. `Idle`
/// touches neither the factory nor the streams.
pub fn dispatch<E, F>(
    command: Command,
    factory: F,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()>
where
    E: Engine,
    F: FnOnce() -> Result<E>,
{
    match command {
        Command::Idle => debug!("No text given, nothing to do"),
        Command::Help => write!(out, "{}", usage())?,
        Command::Version => writeln!(out, "{} {}", crate::APP_NAME, crate::VERSION)?,
        Command::ListVoices => {
            let engine = factory()?;
            let voices = engine.list_voices()?;
            for voice in &voices {
                writeln!(out, "{}", voice)?;
            }
            info!("Listed {} voices", voices.len());
        }
        Command::Speak(text) => {
            let spoken = speak_with(factory, &text, &SpeechSettings::default(), err);
            debug!("Speak finished, success = {}", spoken);
        }
    }
    Ok(())
}
