// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use sub2srt::app_config::Config;
use sub2srt::errors::AppError;
use sub2srt::Controller;

/// sub2srt - convert Sub subtitle files to SRT
///
/// Converts a single `.sub` file, or every `.sub` file found recursively
/// under a directory, into SRT.
#[derive(Parser, Debug)]
#[command(name = "sub2srt")]
#[command(version)]
#[command(about = "Convert .sub subtitle files to SRT")]
#[command(long_about = "Converts loosely-timed .sub subtitle files into standard SRT files.

EXAMPLES:
    sub2srt movie.sub                 # Writes movie.srt next to movie.sub
    sub2srt movie.sub -o converted/   # Writes converted/movie.srt
    sub2srt /subtitles/               # Converts every .sub file under /subtitles

ENVIRONMENT:
    SUB2SRT_CONFIG    Optional JSON config file (output_dir, fallback_encoding, log_level)
    SUB2SRT_LOG       Log level: error, warn, info, debug or trace")]
struct CommandLineOptions {
    /// Input .sub file or directory to process
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (defaults to the directory of each input file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✗", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => ("✓", "1;32"),
            Level::Debug => ("·", "1;36"),
            Level::Trace => ("»", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Install at trace and narrow once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(output) = cli.output {
        config.output_dir = Some(output);
    }

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    // Conversion problems are reported in the transcript; the exit status stays 0
    if let Err(AppError::InvalidInputPath(path)) = controller.run(&cli.input) {
        error!("Invalid input path: {:?} (expected a .sub file or a directory)", path);
    }

    Ok(())
}
