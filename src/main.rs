//! CLI entry point for histogram-preserving texture tiling

use clap::Parser;
use hexblend::io::cli::{Cli, FileProcessor};

fn main() -> hexblend::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
