//! Conversion summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::Outcome;

/// Summary of a batch conversion run
#[derive(Debug, Default, Clone)]
pub struct ConversionSummary {
    /// Candidates handed to the converter, whatever the outcome
    pub attempted: usize,
    pub converted: usize,
    pub failed: usize,
    /// Failures where the WebP was written but the original stayed behind
    pub cleanup_failed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub failed_inputs: Vec<String>,
}

impl ConversionSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.attempted += 1;
        match outcome {
            Outcome::Success {
                input_bytes,
                output_bytes,
                ..
            } => {
                self.converted += 1;
                self.bytes_before += input_bytes;
                self.bytes_after += output_bytes;
            }
            Outcome::Failure { input, error } => {
                self.failed += 1;
                if error.produced_output().is_some() {
                    self.cleanup_failed += 1;
                }
                self.failed_inputs
                    .push(format!("{} ({})", input.display(), error.kind()));
            }
        }
    }

    /// True when candidates were attempted and none produced a WebP file
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.converted + self.cleanup_failed == 0
    }

    /// Space saved across successful conversions, as a percentage
    pub fn reduction_pct(&self) -> f64 {
        if self.bytes_before == 0 || self.bytes_after >= self.bytes_before {
            0.0
        } else {
            ((self.bytes_before - self.bytes_after) as f64 / self.bytes_before as f64) * 100.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Attempted"), Cell::new(self.attempted)]);

        table.add_row(vec![
            Cell::new("✅ Converted"),
            Cell::new(self.converted)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("❌ Failed"),
            Cell::new(self.failed).fg(if self.failed == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        if self.cleanup_failed > 0 {
            table.add_row(vec![
                Cell::new("🧹 Originals left behind"),
                Cell::new(self.cleanup_failed).fg(Color::Yellow),
            ]);
        }

        table.add_row(vec![
            Cell::new("💾 Size before"),
            Cell::new(format_mb(self.bytes_before)),
        ]);
        table.add_row(vec![
            Cell::new("💾 Size after"),
            Cell::new(format_mb(self.bytes_after)),
        ]);

        let reduction = self.reduction_pct();
        let color = if reduction > 30.0 {
            Color::Green
        } else if reduction > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };
        table.add_row(vec![
            Cell::new("📉 Reduction"),
            Cell::new(format!("{:.1}%", reduction))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.failed_inputs.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("FAILED FILES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for input in &self.failed_inputs {
                println!("        {} {}", style("•").dim(), input);
            }
        }
    }
}

fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
