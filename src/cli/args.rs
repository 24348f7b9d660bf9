//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::DEFAULT_QUALITY;

/// towebp - Convert every JPEG, PNG, BMP and TIFF under a directory to WebP,
/// removing the originals
#[derive(Parser, Debug)]
#[command(name = "towebp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to convert recursively. Defaults to the current directory.
    pub root: Option<PathBuf>,

    /// Lossy WebP quality (0-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = validate_quality)]
    pub quality: u8,

    /// Extra path substring to skip, in addition to node_modules, .git and __pycache__.
    /// May be given more than once.
    #[arg(short = 'x', long = "exclude")]
    pub excludes: Vec<String>,
}

impl Cli {
    /// Traversal root, falling back to the current working directory
    pub fn root_or_cwd(&self) -> std::io::Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Validator for the quality parameter
fn validate_quality(s: &str) -> Result<u8, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid integer", s))?;

    if value > 100 {
        Err(format!("quality must be between 0 and 100, got {}", value))
    } else {
        Ok(value as u8)
    }
}
