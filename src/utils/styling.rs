//! Terminal styling utilities for conversion output
//!
//! Colors are dropped automatically by `console` when stdout is not a
//! terminal, so piped output stays plain text.

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::ConvertError;
use crate::report::ConversionSummary;

// Emoji icons with fallbacks for terminals that don't support them
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");

/// Width of the separator lines around the per-file output
pub const SEPARATOR_WIDTH: usize = 50;

/// Print the line announcing the traversal root
pub fn print_root_banner(root: &Path) {
    println!(
        "{} {}",
        style("Converting images to WebP in:").cyan().bold(),
        root.display()
    );
}

pub fn print_separator() {
    println!("{}", style("=".repeat(SEPARATOR_WIDTH)).dim());
}

pub fn print_converted(input: &Path, output: &Path) {
    println!(
        "{} {} -> {}",
        style("Converted:").green(),
        input.display(),
        output.display()
    );
}

pub fn print_removed(input: &Path) {
    println!("{} {}", style("Removed original:").dim(), input.display());
}

pub fn print_convert_error(input: &Path, error: &ConvertError) {
    println!(
        "{} {}: {}",
        style("Error converting").red().bold(),
        input.display(),
        error
    );
}

/// Print a non-fatal warning
pub fn print_warning(message: &str) {
    println!("{}{}", WARN, style(message).yellow());
}

/// Print the closing summary line
pub fn print_completion_line(summary: &ConversionSummary) {
    println!(
        "{}{} Attempted {} images: {} converted, {} failed.",
        ROCKET,
        style("Conversion complete!").green().bold(),
        summary.attempted,
        summary.converted,
        summary.failed
    );
}
