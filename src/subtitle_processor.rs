use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use crate::errors::SubtitleError;

// @module: Sub parsing and SRT rendering

// @const: One or more blank (whitespace-only) lines between two newlines
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").expect("block separator regex is valid")
});

/// Fraction used when a timestamp carries no `.` part
const DEFAULT_FRACTION: &str = "0000000";

/// SRT keeps exactly this many fractional digits
const MILLIS_WIDTH: usize = 3;

/// Number of characters shown when a malformed block is reported
pub const PREVIEW_CHARS: usize = 50;

/// A timestamp normalized to SRT shape.
///
/// Hours, minutes and seconds are carried verbatim from the source text:
/// they are neither validated nor zero-padded. Only the fractional part is
/// normalized, truncated or right-padded to three characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrtTimestamp {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
    pub millis: String,
}

impl SrtTimestamp {
    /// Parse `HH:MM:SS` or `HH:MM:SS.F...`
    pub fn parse(time_str: &str) -> Result<Self, SubtitleError> {
        let malformed = || SubtitleError::MalformedTimestamp(time_str.to_string());

        let with_fraction;
        let full = if time_str.contains('.') {
            time_str
        } else {
            with_fraction = format!("{}.{}", time_str, DEFAULT_FRACTION);
            &with_fraction
        };

        let parts: Vec<&str> = full.split(':').collect();
        let [hours, minutes, seconds_fraction] = parts.as_slice() else {
            return Err(malformed());
        };

        let sub_parts: Vec<&str> = seconds_fraction.split('.').collect();
        let [seconds, fraction] = sub_parts.as_slice() else {
            return Err(malformed());
        };

        // Truncate, never round
        let mut millis: String = fraction.chars().take(MILLIS_WIDTH).collect();
        while millis.chars().count() < MILLIS_WIDTH {
            millis.push('0');
        }

        Ok(SrtTimestamp {
            hours: hours.to_string(),
            minutes: minutes.to_string(),
            seconds: seconds.to_string(),
            millis,
        })
    }
}

impl fmt::Display for SrtTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{},{}", self.hours, self.minutes, self.seconds, self.millis)
    }
}

/// Convert a Sub time token to the SRT `HH:MM:SS,mmm` form
pub fn format_time_str(time_str: &str) -> Result<String, SubtitleError> {
    Ok(SrtTimestamp::parse(time_str)?.to_string())
}

// @struct: Single converted subtitle block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleBlock {
    // @field: 1-based position in the blank-line split, not renumbered after skips
    pub index: usize,

    pub start_time: SrtTimestamp,

    pub end_time: SrtTimestamp,

    // @field: Trimmed text, may span several lines
    pub text: String,
}

impl SubtitleBlock {
    pub fn new(index: usize, start_time: SrtTimestamp, end_time: SrtTimestamp, text: String) -> Self {
        SubtitleBlock {
            index,
            start_time,
            end_time,
            text,
        }
    }
}

impl fmt::Display for SubtitleBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start_time, self.end_time)?;
        writeln!(f, "{}", self.text)
    }
}

/// A block that had no line break between its time line and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockWarning {
    /// 1-based position of the skipped block
    pub index: usize,
    /// First `PREVIEW_CHARS` characters of the block
    pub preview: String,
}

impl fmt::Display for BlockWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {} is malformed, skipping: {}...", self.index, self.preview)
    }
}

/// Result of parsing one Sub document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Surviving blocks, in order of appearance
    pub blocks: Vec<SubtitleBlock>,
    /// Blocks that were dropped
    pub warnings: Vec<BlockWarning>,
}

impl ParsedDocument {
    /// Render the surviving blocks as SRT, one blank line between blocks
    pub fn to_srt_string(&self) -> String {
        render_srt(&self.blocks)
    }
}

/// Render blocks as SRT, one blank line between blocks
pub fn render_srt(blocks: &[SubtitleBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split raw content into trimmed, non-empty block texts
pub fn split_blocks(content: &str) -> Vec<&str> {
    BLOCK_SEPARATOR_REGEX
        .split(content)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Parse a single raw block.
///
/// Returns `Ok(None)` when the block has no line break and must be skipped.
/// A time line that does not hold exactly one comma is an error for the
/// whole document.
pub fn parse_block(index: usize, raw_block: &str) -> Result<Option<SubtitleBlock>, SubtitleError> {
    let Some((time_line, text)) = raw_block.split_once('\n') else {
        return Ok(None);
    };

    let times: Vec<&str> = time_line.split(',').map(str::trim).collect();
    let [start, end] = times.as_slice() else {
        return Err(SubtitleError::MalformedTimeLine {
            index,
            line: time_line.trim().to_string(),
        });
    };

    Ok(Some(SubtitleBlock::new(
        index,
        SrtTimestamp::parse(start)?,
        SrtTimestamp::parse(end)?,
        text.trim().to_string(),
    )))
}

/// Parse a whole Sub document.
///
/// Blocks keep the index of their position in the split, so skipping a
/// malformed block leaves a gap in the numbering.
pub fn parse_sub_string(content: &str) -> Result<ParsedDocument, SubtitleError> {
    let mut warnings = Vec::new();
    let blocks = parse_blocks_into(content, &mut warnings)?;
    Ok(ParsedDocument { blocks, warnings })
}

/// Parse blocks, pushing a warning for every skipped block onto `warnings`.
///
/// Warnings for blocks before a failing time line stay in `warnings` when
/// an error is returned.
pub fn parse_blocks_into(
    content: &str,
    warnings: &mut Vec<BlockWarning>,
) -> Result<Vec<SubtitleBlock>, SubtitleError> {
    let mut blocks = Vec::new();

    for (position, raw_block) in split_blocks(content).into_iter().enumerate() {
        let index = position + 1;
        match parse_block(index, raw_block)? {
            Some(block) => blocks.push(block),
            None => warnings.push(BlockWarning {
                index,
                preview: raw_block.chars().take(PREVIEW_CHARS).collect(),
            }),
        }
    }

    Ok(blocks)
}

/// Parse Sub content and render it straight to SRT
pub fn convert_sub_to_srt(content: &str) -> Result<(String, Vec<BlockWarning>), SubtitleError> {
    let document = parse_sub_string(content)?;
    Ok((document.to_srt_string(), document.warnings))
}
