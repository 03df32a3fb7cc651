//! Batch orchestration of classified relocations.
//!
//! A batch takes a classification map (source file path → destination
//! label) together with the configured destinations, relocates every entry
//! independently, and folds the per-file outcomes into a single
//! [`BatchResult`]. Individual failures never abort the batch; the failed
//! entries are left unmoved and reported while the rest of the batch
//! proceeds.

use crate::destination::{Destination, resolve_destination};
use crate::relocate::{RelocateError, RelocateOutcome, relocate_file};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The input to one batch relocation call.
///
/// This is the on-disk plan format: `classifications` is required, so a
/// plan file missing it fails deserialization as a whole rather than
/// producing a partial result. `destinations` may be omitted when the
/// caller supplies the configured list separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    /// The configured destinations referenced by the classifications.
    #[serde(default)]
    pub destinations: Vec<Destination>,
    /// Mapping from absolute source file path to destination label. Keys
    /// are unique by construction (one decision per file) and the ordered
    /// map fixes the processing order for reproducible output.
    pub classifications: BTreeMap<PathBuf, String>,
}

/// Aggregate result of one batch relocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Whether every entry succeeded (`failed == 0`).
    pub success: bool,
    /// Human-readable summary line, with error details appended when any
    /// entry failed.
    pub message: String,
    /// Number of files copied to a destination.
    pub copied: usize,
    /// Number of exact duplicates discarded without copying.
    pub skipped: usize,
    /// Number of entries left unmoved due to an error.
    pub failed: usize,
    /// Error descriptions in processing order.
    pub errors: Vec<String>,
}

/// Processes every classification in the map, continuing past per-entry
/// failures, and returns the aggregate [`BatchResult`].
///
/// For each entry the destination label is resolved against
/// `destinations`; an unresolvable label records a failure and processing
/// continues. Otherwise the file is relocated via
/// [`relocate_file`](crate::relocate::relocate_file) and its outcome
/// recorded. Entries are processed in the map's key order, so one batch
/// always reports its counts and errors in a stable order.
///
/// An empty classification map yields a successful result with all counts
/// at zero.
///
/// # Examples
///
/// ```no_run
/// use mediasort::batch::sort_media;
/// use mediasort::destination::Destination;
/// use std::collections::BTreeMap;
/// use std::path::PathBuf;
///
/// let destinations = vec![Destination::new("Vacation", "v", "/media/vacation")];
/// let mut classifications = BTreeMap::new();
/// classifications.insert(PathBuf::from("/media/incoming/beach.jpg"), "Vacation".to_string());
///
/// let result = sort_media(&classifications, &destinations);
/// println!("{}", result.message);
/// ```
pub fn sort_media(
    classifications: &BTreeMap<PathBuf, String>,
    destinations: &[Destination],
) -> BatchResult {
    sort_media_with(classifications, destinations, |_| {})
}

/// Like [`sort_media`], invoking `on_entry` with each source path just
/// before it is processed. Used by the CLI to drive progress reporting.
pub fn sort_media_with(
    classifications: &BTreeMap<PathBuf, String>,
    destinations: &[Destination],
    mut on_entry: impl FnMut(&Path),
) -> BatchResult {
    let mut copied = 0;
    let mut skipped = 0;
    let mut failed = 0;
    let mut errors: Vec<String> = Vec::new();

    for (source, label) in classifications {
        on_entry(source);

        let dest_dir = match resolve_destination(destinations, label) {
            Ok(path) => path,
            Err(e) => {
                errors.push(e.to_string());
                failed += 1;
                continue;
            }
        };

        match relocate_file(source, dest_dir) {
            Ok(RelocateOutcome::Copied { .. }) => copied += 1,
            Ok(RelocateOutcome::SkippedDuplicate) => skipped += 1,
            Err(e @ RelocateError::HashVerificationFailed { .. }) => {
                errors.push(e.to_string());
                failed += 1;
            }
            Err(e) => {
                errors.push(format!("Error processing {}: {}", source.display(), e));
                failed += 1;
            }
        }
    }

    let mut message = format!(
        "Copied: {}, Skipped (duplicates): {}, Failed: {}",
        copied, skipped, failed
    );
    if !errors.is_empty() {
        message.push_str("\nErrors:\n");
        message.push_str(&errors.join("\n"));
    }

    BatchResult {
        success: failed == 0,
        message,
        copied,
        skipped,
        failed,
        errors,
    }
}
