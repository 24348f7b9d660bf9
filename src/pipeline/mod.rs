//! Pipeline module - candidate discovery and per-file conversion

pub mod converter;
pub mod error;
pub mod normalize;
pub mod walker;

pub use converter::*;
pub use error::ConvertError;
pub use normalize::{classify, composite_on_background, normalize, ColorMode};
pub use walker::*;
