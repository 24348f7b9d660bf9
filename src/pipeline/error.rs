//! Error types for per-file WebP conversion.
//!
//! Every failure that can happen while converting a single file is one of
//! the `ConvertError` variants. None of them abort a batch: the walker turns
//! them into a failed outcome and moves on to the next candidate.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while converting one image to WebP.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source could not be opened or decoded as an image.
    ///
    /// Covers unreadable files, unsupported formats and corrupt data. The
    /// source is left untouched.
    #[error("failed to load image: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The WebP output could not be encoded or written.
    ///
    /// The source is left untouched.
    #[error("failed to write WebP output {}: {reason}", output.display())]
    Encode { output: PathBuf, reason: String },

    /// The WebP output was written but the original could not be removed.
    ///
    /// Both files remain on disk.
    #[error("converted to {} but failed to remove original: {source}", output.display())]
    Cleanup {
        output: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Short category name used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::Load { .. } => "load",
            ConvertError::Encode { .. } => "encode",
            ConvertError::Cleanup { .. } => "cleanup",
        }
    }

    /// The WebP file this conversion left on disk, if any.
    ///
    /// Only cleanup failures produce an output.
    pub fn produced_output(&self) -> Option<&Path> {
        match self {
            ConvertError::Cleanup { output, .. } => Some(output),
            _ => None,
        }
    }

    pub(crate) fn load(path: &Path, source: impl Into<image::ImageError>) -> Self {
        ConvertError::Load {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn encode(output: &Path, reason: impl Into<String>) -> Self {
        ConvertError::Encode {
            output: output.to_path_buf(),
            reason: reason.into(),
        }
    }
}
