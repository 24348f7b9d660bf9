//! Single-file WebP conversion
//!
//! A conversion runs `open -> normalize -> encode -> delete original`. Each
//! stage short-circuits with a [`ConvertError`]; the original is only removed
//! once the WebP output has been written in full.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use libwebp_sys::WebPConfig;

use super::error::ConvertError;
use super::normalize::{classify, normalize, png_source_mode, ColorMode};
use crate::utils::{print_convert_error, print_converted, print_removed};

/// Default lossy quality on the 0-100 scale
pub const DEFAULT_QUALITY: u8 = 85;

/// libwebp compression method, 6 is the slowest and smallest
pub const WEBP_METHOD: i32 = 6;

/// Extension given to converted files
pub const WEBP_EXTENSION: &str = "webp";

/// Result of a successful transcode, before the original is removed
#[derive(Debug, Clone)]
pub struct Transcoded {
    pub output: PathBuf,
    pub mode: ColorMode,
    pub width: u32,
    pub height: u32,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

/// Outcome of one conversion attempt, as seen by the walker
#[derive(Debug)]
pub enum Outcome {
    Success {
        input: PathBuf,
        output: PathBuf,
        input_bytes: u64,
        output_bytes: u64,
    },
    Failure {
        input: PathBuf,
        error: ConvertError,
    },
}

impl Outcome {
    pub fn input(&self) -> &Path {
        match self {
            Outcome::Success { input, .. } | Outcome::Failure { input, .. } => input,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// WebP file left on disk by this attempt, including cleanup failures
    pub fn produced_output(&self) -> Option<&Path> {
        match self {
            Outcome::Success { output, .. } => Some(output),
            Outcome::Failure { error, .. } => error.produced_output(),
        }
    }
}

/// Anything the walker can hand a candidate file to
pub trait ImageConverter {
    fn convert(&self, input: &Path) -> Outcome;
}

/// Removes an original after its WebP has been written
pub type RemoveFn = fn(&Path) -> io::Result<()>;

/// Lossy WebP converter that deletes originals on success
#[derive(Clone)]
pub struct WebpConverter {
    pub quality: u8,
    remove: RemoveFn,
}

impl Default for WebpConverter {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY)
    }
}

impl std::fmt::Debug for WebpConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebpConverter")
            .field("quality", &self.quality)
            .finish_non_exhaustive()
    }
}

impl WebpConverter {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.min(100),
            remove: remove_file,
        }
    }

    /// Replace how originals are removed, e.g. to move them to a trash folder
    pub fn with_remover(mut self, remove: RemoveFn) -> Self {
        self.remove = remove;
        self
    }
}

impl ImageConverter for WebpConverter {
    fn convert(&self, input: &Path) -> Outcome {
        let transcoded = match transcode(input, None, self.quality) {
            Ok(t) => t,
            Err(error) => {
                print_convert_error(input, &error);
                return Outcome::Failure {
                    input: input.to_path_buf(),
                    error,
                };
            }
        };
        print_converted(input, &transcoded.output);

        if let Err(error) = remove_with(self.remove, input, &transcoded.output) {
            print_convert_error(input, &error);
            return Outcome::Failure {
                input: input.to_path_buf(),
                error,
            };
        }
        print_removed(input);

        Outcome::Success {
            input: input.to_path_buf(),
            output: transcoded.output,
            input_bytes: transcoded.input_bytes,
            output_bytes: transcoded.output_bytes,
        }
    }
}

/// Convert `input` to WebP and delete it, without printing anything.
///
/// `output` defaults to the input path with its extension replaced by `.webp`.
pub fn convert_to_webp(
    input: &Path,
    output: Option<&Path>,
    quality: u8,
) -> Result<Transcoded, ConvertError> {
    let transcoded = transcode(input, output, quality)?;
    remove_original(input, &transcoded.output)?;
    Ok(transcoded)
}

/// Open, normalize, encode and write `input` as WebP. The original is kept.
pub fn transcode(
    input: &Path,
    output: Option<&Path>,
    quality: u8,
) -> Result<Transcoded, ConvertError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| webp_output_path(input));
    let input_bytes = fs::metadata(input).map(|m| m.len()).unwrap_or(0);

    let (image, mode) = load_image(input)?;
    let rgb = normalize(image, mode);
    let (width, height) = rgb.dimensions();

    let encoded = encode_webp(&rgb, quality).map_err(|reason| ConvertError::encode(&output, reason))?;
    fs::write(&output, &encoded).map_err(|e| ConvertError::encode(&output, e.to_string()))?;

    Ok(Transcoded {
        output,
        mode,
        width,
        height,
        input_bytes,
        output_bytes: encoded.len() as u64,
    })
}

/// Remove the original once `output` exists
pub fn remove_original(input: &Path, output: &Path) -> Result<(), ConvertError> {
    remove_with(remove_file, input, output)
}

fn remove_file(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

fn remove_with(remove: RemoveFn, input: &Path, output: &Path) -> Result<(), ConvertError> {
    remove(input).map_err(|source| ConvertError::Cleanup {
        output: output.to_path_buf(),
        source,
    })
}

/// Sibling path with the extension swapped for `.webp`
pub fn webp_output_path(input: &Path) -> PathBuf {
    input.with_extension(WEBP_EXTENSION)
}

/// Decode an image, sniffing the format from its content, and classify its
/// color mode. The file handle is closed before returning.
pub fn load_image(path: &Path) -> Result<(DynamicImage, ColorMode), ConvertError> {
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| ConvertError::load(path, e))?;
    let format = reader.format();
    let image = reader.decode().map_err(|e| ConvertError::load(path, e))?;

    let source = match format {
        Some(ImageFormat::Png) => png_source_mode(path),
        _ => None,
    };
    let mode = classify(&image, source);
    Ok((image, mode))
}

/// Lossy-encode an RGB buffer at the highest compression effort
pub fn encode_webp(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>, String> {
    let mut config =
        WebPConfig::new().map_err(|_| "failed to initialise WebP encoder config".to_string())?;
    config.lossless = 0;
    config.quality = quality.min(100) as f32;
    config.method = WEBP_METHOD;

    let (width, height) = rgb.dimensions();
    let memory = webp::Encoder::from_rgb(rgb.as_raw(), width, height)
        .encode_advanced(&config)
        .map_err(|e| format!("WebP encoder error: {:?}", e))?;

    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webp_output_path_replaces_extension() {
        assert_eq!(
            webp_output_path(Path::new("/photos/beach.jpg")),
            PathBuf::from("/photos/beach.webp")
        );
        assert_eq!(
            webp_output_path(Path::new("scan.v2.TIFF")),
            PathBuf::from("scan.v2.webp")
        );
    }

    #[test]
    fn test_converter_clamps_quality() {
        assert_eq!(WebpConverter::new(250).quality, 100);
        assert_eq!(WebpConverter::default().quality, DEFAULT_QUALITY);
    }

    #[test]
    fn test_encode_webp_produces_riff_container() {
        let rgb = RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 240]));
        let bytes = encode_webp(&rgb, DEFAULT_QUALITY).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }
}
