//! Batch progress display for synthesis runs
//!
//! Shows a per-file bar tracking synthesized rows, collapsing to a
//! single batch bar above a file-count threshold to avoid terminal spam.

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Coordinates progress display for batch synthesis
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    batch_mode: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static ROW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} rows")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            batch_mode: false,
        }
    }

    /// Initialize the display mode based on file count
    ///
    /// Switches to a single batch bar for large file sets to avoid
    /// terminal spam
    pub fn initialize(&mut self, file_count: usize) {
        self.batch_mode = file_count > MAX_INDIVIDUAL_PROGRESS_BARS;
        if self.batch_mode {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Create a row-level bar for one file
    ///
    /// The returned bar is thread safe and cheap to clone; synthesis
    /// workers tick it as rows complete. In batch mode a hidden bar is
    /// returned so callers need no special case.
    pub fn start_file(&self, path: &Path, total_rows: usize) -> ProgressBar {
        if self.batch_mode {
            return ProgressBar::hidden();
        }
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let bar = ProgressBar::new(total_rows as u64);
        bar.set_style(ROW_STYLE.clone());
        bar.set_prefix(display_name);
        self.multi_progress.add(bar)
    }

    /// Mark a file as completed and advance batch progress
    pub fn complete_file(&self, bar: &ProgressBar) {
        bar.finish_and_clear();
        self.multi_progress.remove(bar);
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
