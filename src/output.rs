//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! messages, progress tracking for batch runs, and the end-of-batch
//! summary table.

use crate::batch::BatchResult;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates and returns a progress bar for batch relocation.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the end-of-batch summary: counts, then the error list when
    /// any entry failed.
    pub fn batch_summary(result: &BatchResult) {
        Self::header("SUMMARY");
        println!(
            "{:<22} | {}",
            "Copied",
            result.copied.to_string().green()
        );
        println!(
            "{:<22} | {}",
            "Skipped (duplicates)",
            result.skipped.to_string().yellow()
        );
        println!("{:<22} | {}", "Failed", result.failed.to_string().red());

        if !result.errors.is_empty() {
            Self::header("ERRORS");
            for error in &result.errors {
                Self::error(error);
            }
        }

        if result.success {
            Self::success("Batch complete.");
        } else {
            Self::warning("Batch finished with failures; failed files were left in place.");
        }
    }
}
