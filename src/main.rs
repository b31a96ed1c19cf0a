//! zhsay main entry point
//!
//! `zhsay <text>` speaks the text and exits. Without text it does nothing.

use anyhow::Context;
use log::{error, info};
use std::fs::OpenOptions;
use std::io;
use std::process;
use zhsay::cli::{dispatch, Cli, Command};
use zhsay::speech::backends::NativeEngine;

fn main() {
    let cli = Cli::parse(std::env::args().skip(1));

    init_logging(cli.debug);

    if let Err(e) = run(cli.command) {
        error!("Fatal error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to zhsay.log file
        let log_path = format!("{}.log", zhsay::APP_NAME);
        match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open {} for debug logging: {}", log_path, e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "zhsay version {} starting (debug mode, logging to {})",
            zhsay::VERSION,
            log_path
        );
    } else {
        normal_logger(env_logger::Env::default()).init();
    }
}

/// Normal mode: only errors reach stderr unless RUST_LOG says otherwise
fn normal_logger(env: env_logger::Env) -> env_logger::Builder {
    env_logger::Builder::from_env(env.default_filter_or("error"))
}

fn run(command: Command) -> anyhow::Result<()> {
    let what = match &command {
        Command::ListVoices => "Cannot list voices",
        _ => "Command failed",
    };

    // The speak path reports its own failure on stderr; the exit status stays 0
    let stdout = io::stdout();
    let stderr = io::stderr();
    dispatch(command, NativeEngine::new, &mut stdout.lock(), &mut stderr.lock()).context(what)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_logger_defaults_to_errors() {
        let env = env_logger::Env::new().filter("ZHSAY_TEST_LOG_UNSET");
        std::env::remove_var("ZHSAY_TEST_LOG_UNSET");
        let logger = normal_logger(env).build();
        assert_eq!(logger.filter(), log::LevelFilter::Error);
    }

    #[test]
    fn test_normal_logger_honors_env_filter() {
        let env = env_logger::Env::new().filter("ZHSAY_TEST_LOG_DEBUG");
        std::env::set_var("ZHSAY_TEST_LOG_DEBUG", "debug");
        let logger = normal_logger(env).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }
}
