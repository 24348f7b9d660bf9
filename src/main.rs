//! towebp: Batch WebP Conversion CLI Tool
//!
//! Converts every supported image under the given directory (or the current
//! one) to WebP and deletes the originals.

use anyhow::Result;
use clap::Parser;

use towebp::cli::{run_convert, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let summary = run_convert(&cli)?;
    summary.display();

    // Zero candidates is a clean run; only a batch where nothing converted fails
    if summary.all_failed() {
        anyhow::bail!(
            "All {} image(s) failed to convert",
            summary.attempted
        );
    }

    Ok(())
}
