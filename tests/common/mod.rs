//! Shared test utilities and fixture generators

#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use towebp::pipeline::{ImageConverter, Outcome};

/// Create an RGB image filled with seeded noise
pub fn create_noise_image(width: u32, height: u32, seed: u64) -> RgbImage {
    use rand::{Rng, SeedableRng};
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

/// Create an RGBA image whose left half is fully transparent black and whose
/// right half is the given opaque color
pub fn create_half_transparent_image(width: u32, height: u32, color: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([color[0], color[1], color[2], 255])
        }
    })
}

/// Save a small RGB image at `dir/name`, creating parent directories.
/// The encoder is picked from the extension.
pub fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    create_noise_image(width, height, 7).save(&path).unwrap();
    path
}

/// Write an 8-bit PNG with an explicit color type, palette and tRNS chunk
pub fn write_raw_png(
    path: &Path,
    width: u32,
    height: u32,
    color: png::ColorType,
    palette: Option<Vec<u8>>,
    trns: Vec<u8>,
    data: &[u8],
) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    if let Some(palette) = palette {
        encoder.set_palette(palette);
    }
    encoder.set_trns(trns);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(data).unwrap();
    writer.finish().unwrap();
}

/// Indexed PNG: left half uses a fully transparent palette entry holding
/// `hidden`, right half an opaque `visible` entry
pub fn write_indexed_png_with_trns(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    hidden: [u8; 3],
    visible: [u8; 3],
) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(move |x| if x < width / 2 { 0 } else { 1 }))
        .collect();
    let palette = [hidden, visible].concat();
    write_raw_png(
        &path,
        width,
        height,
        png::ColorType::Indexed,
        Some(palette),
        vec![0, 255],
        &data,
    );
    path
}

/// RGB PNG filled with `color`, with a tRNS color key matching that color
pub fn write_color_keyed_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    let data: Vec<u8> = (0..width * height).flat_map(|_| color).collect();
    let key = vec![0, color[0], 0, color[1], 0, color[2]];
    write_raw_png(&path, width, height, png::ColorType::Rgb, None, key, &data);
    path
}

/// Removal step that always fails, leaving the original in place
pub fn refuse_removal(_: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "original is locked",
    ))
}

/// Write bytes that no decoder accepts
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"definitely not an image").unwrap();
    path
}

/// Create an empty file, enough for traversal tests that never decode
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"").unwrap();
    path
}

/// Create a temporary directory with a mixed tree of candidates and files
/// that must be skipped
pub fn create_mixed_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for name in [
        "a.jpg",
        "b.JPEG",
        "nested/c.png",
        "nested/deeper/d.bmp",
        "e.tiff",
        "f.TIF",
        // skipped
        "done.webp",
        "anim.gif",
        "notes.txt",
        "node_modules/pkg/logo.png",
        ".git/objects/blob.png",
        "src/__pycache__/x.png",
        "ThetaTau copy/old.jpg",
    ] {
        touch(root, name);
    }

    temp_dir
}

/// Converter that records what it was asked to convert and touches nothing
#[derive(Default)]
pub struct RecordingConverter {
    pub calls: RefCell<Vec<PathBuf>>,
}

impl ImageConverter for RecordingConverter {
    fn convert(&self, input: &Path) -> Outcome {
        self.calls.borrow_mut().push(input.to_path_buf());
        Outcome::Success {
            input: input.to_path_buf(),
            output: input.with_extension("webp"),
            input_bytes: 0,
            output_bytes: 0,
        }
    }
}

/// Relative, forward-slashed file names of everything under `root`
pub fn relative_names(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

/// Assert two colors are within `tolerance` per channel
pub fn assert_color_near(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
    for channel in 0..3 {
        let diff = (actual[channel] as i16 - expected[channel] as i16).unsigned_abs();
        assert!(
            diff <= tolerance as u16,
            "Color mismatch: expected {:?}, got {:?} (tolerance {})",
            expected,
            actual,
            tolerance
        );
    }
}
