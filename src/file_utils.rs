use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use encoding_rs::Encoding;
use log::debug;
use walkdir::WalkDir;
use crate::errors::ConversionError;

// @module: File and directory utilities

/// Extension of the input format, without the dot
pub const SUB_EXTENSION: &str = "sub";

/// Extension of the output format, without the dot
pub const SRT_EXTENSION: &str = "srt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @checks: Existing file with a `.sub` extension, any case
    pub fn is_sub_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        Self::file_exists(path)
            && path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(SUB_EXTENSION))
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), ConversionError> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path).map_err(|source| ConversionError::CreateOutputDir {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }

    // @generates: Output path for the converted subtitle
    // @params: input_file, output_dir (None = next to the input)
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, output_dir: Option<&Path>) -> PathBuf {
        let input_file = input_file.as_ref();

        let stem = input_file.file_stem().unwrap_or_default();
        let mut output_filename = stem.to_os_string();
        output_filename.push(".");
        output_filename.push(SRT_EXTENSION);

        match output_dir {
            Some(dir) => dir.join(output_filename),
            None => input_file
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(output_filename),
        }
    }

    /// Recursively find files whose extension is exactly `extension`.
    ///
    /// The match is case-sensitive. Results are ordered by walking the tree
    /// with entries sorted by file name; unreadable entries are skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Vec<PathBuf> {
        let wanted = OsStr::new(extension.trim_start_matches('.'));

        WalkDir::new(dir.as_ref())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension() == Some(wanted))
            .collect()
    }

    /// Find every `.sub` file under a directory
    pub fn find_sub_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
        Self::find_files(dir, SUB_EXTENSION)
    }

    /// Read a file as text, trying UTF-8 first and `fallback` second.
    ///
    /// Both decodes are strict. Line endings come back as `\n`.
    pub fn read_decoded<P: AsRef<Path>>(path: P, fallback: &'static Encoding) -> Result<String, ConversionError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConversionError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let text = decode_with_fallback(&bytes, fallback).ok_or_else(|| ConversionError::Decode {
            path: path.to_path_buf(),
            fallback: fallback.name().to_string(),
        })?;

        Ok(normalize_newlines(&text))
    }

    /// Write a string to a file, replacing any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), ConversionError> {
        let path = path.as_ref();
        fs::write(path, content).map_err(|source| ConversionError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Decode bytes as UTF-8, or with `fallback` if they are not valid UTF-8
pub fn decode_with_fallback<'a>(bytes: &'a [u8], fallback: &'static Encoding) -> Option<Cow<'a, str>> {
    match std::str::from_utf8(bytes) {
        // A leading BOM is dropped here; a plain UTF-8 read keeps it in the
        // first hour field
        Ok(text) => Some(Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text))),
        Err(e) => {
            debug!("Not valid UTF-8 ({}), trying {}", e, fallback.name());
            // encoding_rs decodes GBK with GB18030 rules, so 4-byte sequences are accepted
            fallback.decode_without_bom_handling_and_without_replacement(bytes)
        }
    }
}

/// Turn `\r\n` and lone `\r` into `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
