/*!
 * Error types for the sub2srt application.
 *
 * This module contains custom error types for the different layers of a
 * conversion, using the thiserror crate for ergonomic error definitions.
 * Block-level problems are not errors; see `subtitle_processor::BlockWarning`.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing Sub content; any of them fails the whole file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A time token did not have the `HH:MM:SS[.fraction]` shape
    #[error("malformed timestamp '{0}': expected HH:MM:SS or HH:MM:SS.fraction")]
    MalformedTimestamp(String),

    /// A time line did not split into exactly two comma-separated tokens
    #[error("malformed time line '{line}' in block {index}: expected '<start>,<end>'")]
    MalformedTimeLine {
        /// 1-based position of the block
        index: usize,
        /// The offending time line
        line: String,
    },
}

/// File-level failures of a single conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    /// The output directory could not be created
    #[error("failed to create output directory {path:?}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were neither valid UTF-8 nor valid in the fallback encoding
    #[error("could not decode {path:?} as UTF-8 or {fallback}")]
    Decode {
        path: PathBuf,
        fallback: String,
    },

    /// The decoded content could not be parsed
    #[error("{0}")]
    Subtitle(#[from] SubtitleError),

    /// The output file could not be written
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Input path is neither a `.sub` file nor a directory
    #[error("invalid input path: {0:?}")]
    InvalidInputPath(PathBuf),
}
