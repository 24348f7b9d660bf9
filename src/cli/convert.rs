//! Batch entry point tying the CLI to the walker and converter

use anyhow::{Context, Result};

use super::Cli;
use crate::pipeline::{Walker, WalkerConfig, WebpConverter};
use crate::report::ConversionSummary;

/// Run a full conversion over the directory named by `cli`.
///
/// Fails only on fatal traversal errors. Per-file failures end up in the
/// returned summary.
pub fn run_convert(cli: &Cli) -> Result<ConversionSummary> {
    let root = cli
        .root_or_cwd()
        .context("Failed to determine the current directory")?;
    let root = std::fs::canonicalize(&root)
        .with_context(|| format!("Failed to read directory: {}", root.display()))?;

    let config = WalkerConfig::new(root).with_excludes(cli.excludes.iter().cloned());
    let converter = WebpConverter::new(cli.quality);

    Walker::new(config).run(&converter)
}
