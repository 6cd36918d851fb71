use anyhow::Result;
use encoding_rs::Encoding;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use crate::app_config::Config;
use crate::errors::{AppError, ConversionError};
use crate::file_utils::FileManager;
use crate::subtitle_processor::{self, BlockWarning};

// @module: Application controller for Sub to SRT conversion

/// Outcome of converting one file
#[derive(Debug)]
pub enum ConversionOutcome {
    /// The `.srt` file was written; `warnings` lists skipped blocks
    Success {
        input: PathBuf,
        output: PathBuf,
        block_count: usize,
        warnings: Vec<BlockWarning>,
    },
    /// Nothing was written for this input; `warnings` lists blocks
    /// skipped before the failure
    Failure {
        input: PathBuf,
        error: ConversionError,
        warnings: Vec<BlockWarning>,
    },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }

    /// Blocks skipped while parsing, whatever the outcome
    pub fn warnings(&self) -> &[BlockWarning] {
        match self {
            ConversionOutcome::Success { warnings, .. } | ConversionOutcome::Failure { warnings, .. } => warnings,
        }
    }

    pub fn input(&self) -> &Path {
        match self {
            ConversionOutcome::Success { input, .. } | ConversionOutcome::Failure { input, .. } => input,
        }
    }
}

/// Per-file outcomes of a run, in processing order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ConversionOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Encoding tried after UTF-8
    fallback_encoding: &'static Encoding,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let fallback_encoding = config.fallback_encoding()?;

        Ok(Self {
            config,
            fallback_encoding,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a `.sub` file or every `.sub` file under a directory.
    ///
    /// One file failing never stops the others. An input that is neither a
    /// `.sub` file nor a directory is rejected before anything is written.
    pub fn run<P: AsRef<Path>>(&self, input_path: P) -> Result<BatchReport, AppError> {
        let input_path = input_path.as_ref();
        let mut report = BatchReport::default();

        if FileManager::is_sub_file(input_path) {
            report.outcomes.push(self.convert_file(input_path));
        } else if FileManager::dir_exists(input_path) {
            let sub_files = FileManager::find_sub_files(input_path);
            if sub_files.is_empty() {
                info!("No .sub files found in: {:?}", input_path);
                return Ok(report);
            }

            info!("Found {} .sub file(s), starting batch conversion...", sub_files.len());
            for sub_file in &sub_files {
                report.outcomes.push(self.convert_file(sub_file));
            }

            info!(
                "Batch finished: {} converted, {} failed",
                report.succeeded(),
                report.failed()
            );
        } else {
            return Err(AppError::InvalidInputPath(input_path.to_path_buf()));
        }

        Ok(report)
    }

    /// Convert one file and log what happened
    pub fn convert_file<P: AsRef<Path>>(&self, input_file: P) -> ConversionOutcome {
        let input = input_file.as_ref().to_path_buf();
        let output = FileManager::generate_output_path(&input, self.config.output_dir.as_deref());

        let mut warnings = Vec::new();
        let outcome = match self.try_convert(&input, &output, &mut warnings) {
            Ok(block_count) => ConversionOutcome::Success {
                input,
                output,
                block_count,
                warnings,
            },
            Err(error) => ConversionOutcome::Failure { input, error, warnings },
        };

        Self::log_outcome(&outcome);
        outcome
    }

    fn try_convert(
        &self,
        input: &Path,
        output: &Path,
        warnings: &mut Vec<BlockWarning>,
    ) -> Result<usize, ConversionError> {
        if let Some(output_dir) = &self.config.output_dir {
            FileManager::ensure_dir(output_dir)?;
        }

        let content = FileManager::read_decoded(input, self.fallback_encoding)?;
        let blocks = subtitle_processor::parse_blocks_into(&content, warnings)?;
        debug!(
            "Parsed {} block(s) from {:?}, {} skipped",
            blocks.len(),
            input,
            warnings.len()
        );

        FileManager::write_to_file(output, &subtitle_processor::render_srt(&blocks))?;

        Ok(blocks.len())
    }

    fn log_outcome(outcome: &ConversionOutcome) {
        match outcome {
            ConversionOutcome::Success { input, output, warnings, .. } => {
                for warning in warnings {
                    warn!("{:?}: {}", input, warning);
                }
                info!("Converted: {:?} -> {:?}", input, output);
            }
            ConversionOutcome::Failure { input, error, warnings } => {
                for warning in warnings {
                    warn!("{:?}: {}", input, warning);
                }
                error!("Conversion failed for {:?}: {}", input, error);
            }
        }
    }
}
