//! towebp: Batch WebP Conversion Library
//!
//! Walks a directory tree, converts every JPEG, PNG, BMP and TIFF it finds
//! to lossy WebP and removes the originals.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
