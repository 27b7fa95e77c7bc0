//! Command-line interface for batch texture synthesis
//!
//! Processes single images or whole directories, deriving an output path
//! per exemplar and skipping files whose output already exists.

use crate::io::configuration::{DEFAULT_OUTPUT_SCALE, OUTPUT_SUFFIX};
use crate::io::error::{Result, io_error};
use crate::io::progress::ProgressManager;
use crate::io::raster::{Exemplar, export_channels_as_png};
use crate::synthesis::engine::{SynthesisConfig, Synthesizer};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hexblend")]
#[command(
    author,
    version,
    about = "Tile an exemplar texture seamlessly using histogram-preserving blending"
)]
/// Command-line arguments for the texture synthesis tool
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output width in pixels (implies square if height not specified)
    #[arg(short = 'w', long)]
    pub width: Option<usize>,

    /// Output height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of exemplar images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            Self::process_file(
                file,
                &self.cli,
                self.progress_manager.as_ref(),
            )?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_supported_image(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a PNG or JPEG image"))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if is_supported_image(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(
        input_path: &Path,
        cli: &Cli,
        progress_manager: Option<&ProgressManager>,
    ) -> Result<()> {
        let output_path = Self::get_output_path(input_path);

        let exemplar = Exemplar::from_path(input_path)?;

        let (output_height, output_width) = match (cli.height, cli.width) {
            (Some(h), Some(w)) => (h, w),
            (Some(h), None) => (h, h),
            (None, Some(w)) => (w, w),
            (None, None) => (
                exemplar.height() * DEFAULT_OUTPUT_SCALE,
                exemplar.width() * DEFAULT_OUTPUT_SCALE,
            ),
        };

        let config = SynthesisConfig::with_output_size(output_width, output_height);
        let synthesizer = Synthesizer::from_channels(exemplar.channels(), config)?;

        let total_rows = output_height * synthesizer.channel_count();
        let bar = progress_manager.map(|pm| pm.start_file(input_path, total_rows));
        let tick = || {
            if let Some(ref b) = bar {
                b.inc(1);
            }
        };

        let mut outputs = Vec::with_capacity(synthesizer.channel_count());
        for channel in 0..synthesizer.channel_count() {
            outputs.push(synthesizer.synthesize_channel_with(channel, &tick)?);
        }

        export_channels_as_png(
            &outputs,
            output_path
                .to_str()
                .ok_or_else(|| io_error("Invalid output path"))?,
        )?;

        if let (Some(pm), Some(b)) = (progress_manager, bar.as_ref()) {
            pm.complete_file(b);
        }

        Ok(())
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg"
            )
        })
}
