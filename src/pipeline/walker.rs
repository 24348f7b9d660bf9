//! Directory traversal and batch driver
//!
//! Collects candidate images under a root, then hands each one to an
//! [`ImageConverter`] in sorted order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

use super::converter::{ImageConverter, Outcome, WEBP_EXTENSION};
use crate::report::ConversionSummary;
use crate::utils::{
    create_spinner, print_completion_line, print_root_banner, print_separator, print_warning,
};

/// Extensions (lowercase, without the dot) eligible for conversion
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

/// Path substrings that exclude a file from conversion
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "__pycache__", "ThetaTau copy"];

/// Traversal settings for a batch run
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub excludes: Vec<String>,
}

impl WalkerConfig {
    /// Config with the default extension and exclusion lists
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: SUPPORTED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Append extra excluded substrings, ignoring blanks and duplicates
    pub fn with_excludes<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in extra {
            let pattern = pattern.into();
            if !pattern.is_empty() && !self.excludes.contains(&pattern) {
                self.excludes.push(pattern);
            }
        }
        self
    }

    /// Whether a path relative to the root contains an excluded substring
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let relative = relative.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| relative.contains(pattern.as_str()))
    }

    /// Whether a file name carries a supported, non-WebP extension
    pub fn is_supported(&self, path: &Path) -> bool {
        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(e) => e.to_lowercase(),
            None => return false,
        };
        extension != WEBP_EXTENSION && self.extensions.iter().any(|e| *e == extension)
    }
}

/// Batch driver over one directory tree
pub struct Walker {
    config: WalkerConfig,
}

impl Walker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Find every candidate under the root, sorted.
    ///
    /// Fails only when the root itself cannot be enumerated. Unreadable
    /// entries further down are reported and skipped.
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.root;
        let metadata = std::fs::metadata(root)
            .with_context(|| format!("Failed to read directory: {}", root.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let mut candidates = Vec::new();
        let walk = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_entry(entry));

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(err)
                        .with_context(|| format!("Failed to read directory: {}", root.display()));
                }
                Err(err) => {
                    print_warning(&format!("Skipping unreadable entry: {}", err));
                    continue;
                }
            };

            if entry.file_type().is_file() && self.config.is_supported(entry.path()) {
                candidates.push(entry.into_path());
            }
        }

        candidates.sort();
        Ok(candidates)
    }

    /// Convert every candidate with `converter` and summarize the run.
    ///
    /// Each candidate counts as attempted whatever its outcome.
    pub fn run<C: ImageConverter>(&self, converter: &C) -> Result<ConversionSummary> {
        print_root_banner(&self.config.root);
        print_separator();

        let spinner = create_spinner("Scanning for images...");
        let candidates = self.candidates();
        spinner.finish_and_clear();
        let candidates = candidates?;

        let mut summary = ConversionSummary::default();
        for path in &candidates {
            let outcome: Outcome = converter.convert(path);
            summary.record(&outcome);
        }

        print_separator();
        print_completion_line(&summary);

        Ok(summary)
    }

    fn is_excluded_entry(&self, entry: &DirEntry) -> bool {
        let relative = entry
            .path()
            .strip_prefix(&self.config.root)
            .unwrap_or_else(|_| entry.path());
        self.config.is_excluded(relative)
    }
}
