//! Command-line interface module for mediasort.
//!
//! This module handles all CLI-related functionality:
//! - Command definitions and parsing (clap derive)
//! - Wiring the scanner, metadata prober, config store and batch
//!   orchestrator to terminal output
//! - Desktop open/reveal actions

use crate::batch::{SortRequest, sort_media_with};
use crate::config::ConfigStore;
use crate::desktop;
use crate::metadata::{self, MediaKind};
use crate::output::OutputFormatter;
use crate::scanner;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

/// Classify media files into named destination folders and commit the
/// batch with digest-verified moves.
#[derive(Parser, Debug)]
#[command(name = "mediasort", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the media files in a directory, sorted by name.
    List {
        /// Directory to scan.
        dir: PathBuf,
    },
    /// Run a batch relocation described by a JSON plan file.
    ///
    /// The plan maps absolute source file paths to destination labels.
    /// When the plan carries no destination list, the configured
    /// destinations from ~/.mediasort are used.
    Sort {
        /// Path to the plan file.
        plan: PathBuf,
    },
    /// Print the configured destinations.
    Destinations,
    /// Print metadata (size, dimensions, duration) for one media file.
    Probe {
        /// File to probe.
        file: PathBuf,
    },
    /// Open a file with the OS default application.
    Open {
        /// File to open.
        file: PathBuf,
    },
    /// Reveal a file in the platform file manager.
    Reveal {
        /// File to reveal.
        file: PathBuf,
    },
}

/// Runs the parsed CLI command.
///
/// Returns an error string for call-level failures (unreadable plan,
/// missing directory); a batch that finishes with per-file failures also
/// returns an error so the process exits nonzero, after the summary has
/// been printed.
pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::List { dir } => run_list(&dir),
        Command::Sort { plan } => run_sort(&plan),
        Command::Destinations => run_destinations(),
        Command::Probe { file } => run_probe(&file),
        Command::Open { file } => desktop::open_file(&file).map_err(|e| e.to_string()),
        Command::Reveal { file } => {
            desktop::reveal_in_file_manager(&file).map_err(|e| e.to_string())
        }
    }
}

fn run_list(dir: &Path) -> Result<(), String> {
    let files = scanner::scan_media_dir(dir).map_err(|e| e.to_string())?;

    if files.is_empty() {
        OutputFormatter::info("No media files found.");
        return Ok(());
    }

    OutputFormatter::info(&format!("Media files in {}:", dir.display()));
    for file in &files {
        OutputFormatter::plain(&format!(" - {} ({})", file.name, human_size(file.size)));
    }
    OutputFormatter::plain(&format!("{} file(s)", files.len()));
    Ok(())
}

fn run_sort(plan_path: &Path) -> Result<(), String> {
    let content = fs::read_to_string(plan_path)
        .map_err(|e| format!("Error reading plan {}: {}", plan_path.display(), e))?;
    let request: SortRequest = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid sort plan {}: {}", plan_path.display(), e))?;

    let destinations = if request.destinations.is_empty() {
        let store = ConfigStore::new().map_err(|e| e.to_string())?;
        store.load_destinations().map_err(|e| e.to_string())?
    } else {
        request.destinations.clone()
    };

    if request.classifications.is_empty() {
        OutputFormatter::info("Nothing to do: the plan contains no classifications.");
        return Ok(());
    }

    OutputFormatter::info(&format!(
        "Relocating {} file(s)...",
        request.classifications.len()
    ));

    let pb = OutputFormatter::create_progress_bar(request.classifications.len() as u64);
    let result = sort_media_with(&request.classifications, &destinations, |source| {
        if let Some(name) = source.file_name() {
            pb.set_message(name.to_string_lossy().to_string());
        }
        pb.inc(1);
    });
    pb.finish_and_clear();

    OutputFormatter::batch_summary(&result);

    if result.success {
        Ok(())
    } else {
        Err(format!(
            "{} file(s) could not be relocated and were left in place",
            result.failed
        ))
    }
}

fn run_destinations() -> Result<(), String> {
    let store = ConfigStore::new().map_err(|e| e.to_string())?;
    let destinations = store.load_destinations().map_err(|e| e.to_string())?;

    if destinations.is_empty() {
        OutputFormatter::info("No destinations configured.");
        return Ok(());
    }

    OutputFormatter::header("DESTINATIONS");
    for destination in &destinations {
        OutputFormatter::plain(&format!(
            " [{}] {} -> {}",
            destination.key, destination.name, destination.path
        ));
    }
    Ok(())
}

fn run_probe(file: &Path) -> Result<(), String> {
    let meta = metadata::probe(file).map_err(|e| e.to_string())?;

    let kind = match meta.kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    };
    OutputFormatter::info(&format!("{} ({})", file.display(), kind));
    OutputFormatter::plain(&format!("  size: {}", human_size(meta.size)));
    match (meta.width, meta.height) {
        (Some(w), Some(h)) => OutputFormatter::plain(&format!("  dimensions: {}x{}", w, h)),
        _ => OutputFormatter::plain("  dimensions: unknown"),
    }
    if meta.kind == MediaKind::Video {
        match meta.duration_seconds {
            Some(d) => OutputFormatter::plain(&format!("  duration: {:.1}s", d)),
            None => OutputFormatter::plain("  duration: unknown"),
        }
    }
    Ok(())
}

/// Formats a byte count with binary units.
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_size_units() {
        assert_eq!(human_size(512), "512 bytes");
        assert_eq!(human_size(2048), "2.00 KB");
        assert_eq!(human_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_cli_parses_sort_command() {
        let cli = Cli::try_parse_from(["mediasort", "sort", "plan.json"])
            .expect("Command should parse");
        assert!(matches!(cli.command, Command::Sort { .. }));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["mediasort"]).is_err());
    }
}
