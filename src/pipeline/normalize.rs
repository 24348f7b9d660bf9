//! Color mode normalization before WebP encoding
//!
//! Every decoded image is flattened to opaque 8-bit RGB. Images with a true
//! RGBA layout are composited onto a white canvas using their alpha channel.
//! Luma+alpha and palette images are copied without a mask, which discards
//! their transparency.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};

/// Background used when flattening transparent images
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Color layout of a decoded image, as far as normalization cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// RGB source, alpha from a color key is dropped
    Rgb,
    /// RGB with alpha, composited onto the background
    Rgba,
    /// Grayscale with alpha, alpha dropped
    LumaAlpha,
    /// Palette-indexed source, alpha dropped
    Palette,
    /// Anything else (grayscale, 16-bit RGB, float RGB), converted to RGB
    Other,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::LumaAlpha => "LA",
            ColorMode::Palette => "P",
            ColorMode::Other => "other",
        }
    }
}

/// Classify a decoded image.
///
/// `source` is the mode declared by the file itself, when it is known.
/// Decoders expand palettes and color keys into RGB or RGBA buffers, so the
/// buffer alone cannot tell those sources apart from true RGBA.
pub fn classify(image: &DynamicImage, source: Option<ColorMode>) -> ColorMode {
    if let Some(mode) = source {
        return mode;
    }

    match image {
        DynamicImage::ImageRgb8(_) => ColorMode::Rgb,
        DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageRgba16(_)
        | DynamicImage::ImageRgba32F(_) => ColorMode::Rgba,
        DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => ColorMode::LumaAlpha,
        _ => ColorMode::Other,
    }
}

/// Mode declared by a PNG header, for layouts the decoder expands.
///
/// Indexed PNGs are `Palette` and RGB PNGs are `Rgb` even when a tRNS chunk
/// makes the decoded buffer RGBA. Other layouts, and unreadable headers,
/// return `None` and are classified from the decoded buffer.
pub fn png_source_mode(path: &Path) -> Option<ColorMode> {
    let file = File::open(path).ok()?;
    let reader = png::Decoder::new(BufReader::new(file)).read_info().ok()?;

    match reader.info().color_type {
        png::ColorType::Indexed => Some(ColorMode::Palette),
        png::ColorType::Rgb => Some(ColorMode::Rgb),
        _ => None,
    }
}

/// Flatten an image to opaque 8-bit RGB according to its mode
pub fn normalize(image: DynamicImage, mode: ColorMode) -> RgbImage {
    match mode {
        ColorMode::Rgba => composite_on_background(&image.to_rgba8()),
        // into_rgb8 on an RGB8 image hands the buffer back without copying
        ColorMode::Rgb | ColorMode::LumaAlpha | ColorMode::Palette | ColorMode::Other => {
            image.into_rgb8()
        }
    }
}

/// Composite an RGBA image onto an opaque white canvas of the same size,
/// using the alpha channel as mask
pub fn composite_on_background(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut canvas = RgbImage::from_pixel(width, height, image::Rgb(BACKGROUND));

    for (dst, src) in canvas.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        for channel in 0..3 {
            dst[channel] = blend(src[channel] as u32, BACKGROUND[channel] as u32, alpha);
        }
    }

    canvas
}

#[inline]
fn blend(fg: u32, bg: u32, alpha: u32) -> u8 {
    ((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8
}
