/*!
 * # sub2srt
 *
 * A Rust library for converting loosely-timed "Sub" subtitle files into SRT.
 *
 * ## Features
 *
 * - Convert a single `.sub` file or every `.sub` file under a directory
 * - Normalize `HH:MM:SS[.fraction]` timestamps to `HH:MM:SS,mmm`
 * - Skip malformed blocks with a warning instead of failing the file
 * - Read UTF-8 input with a GBK fallback; always write UTF-8
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: Timestamp formatting, block parsing, SRT rendering
 * - `file_utils`: File system operations and text decoding
 * - `app_controller`: Per-file conversion and the batch driver
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod subtitle_processor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{BatchReport, ConversionOutcome, Controller};
pub use subtitle_processor::{
    format_time_str, parse_sub_string, BlockWarning, ParsedDocument, SrtTimestamp, SubtitleBlock,
};
pub use errors::{AppError, ConversionError, SubtitleError};
