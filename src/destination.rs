//! Destination configuration and label resolution.
//!
//! A [`Destination`] is a named target directory the user can file media
//! into. Classifications refer to destinations by their `name` label; this
//! module resolves a label back to the configured directory path.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named target directory for classified media files.
///
/// Destinations are created and edited by the user via configuration and
/// are immutable for the duration of a single batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Unique user-facing label.
    pub name: String,
    /// Shortcut identifier (e.g. a single key used by a frontend).
    pub key: String,
    /// Absolute directory path files are relocated into.
    pub path: String,
}

impl Destination {
    /// Creates a new destination entry.
    pub fn new(name: impl Into<String>, key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            path: path.into(),
        }
    }
}

/// Error returned when a classification label matches no configured
/// destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationNotFound {
    /// The label that failed to resolve.
    pub label: String,
}

impl std::fmt::Display for DestinationNotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Destination folder not found: {}", self.label)
    }
}

impl std::error::Error for DestinationNotFound {}

/// Resolves a destination label to its configured directory path.
///
/// Lookup is an exact string match against each entry's `name`. If the
/// configuration contains duplicate labels the first match wins; keeping
/// the configuration free of duplicates is the caller's responsibility.
///
/// # Errors
///
/// Returns [`DestinationNotFound`] if no entry's `name` matches `label`.
pub fn resolve_destination<'a>(
    destinations: &'a [Destination],
    label: &str,
) -> Result<&'a Path, DestinationNotFound> {
    destinations
        .iter()
        .find(|d| d.name == label)
        .map(|d| Path::new(d.path.as_str()))
        .ok_or_else(|| DestinationNotFound {
            label: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_destinations() -> Vec<Destination> {
        vec![
            Destination::new("Vacation", "v", "/media/vacation"),
            Destination::new("Family", "f", "/media/family"),
        ]
    }

    #[test]
    fn test_resolve_known_label() {
        let destinations = sample_destinations();
        let path = resolve_destination(&destinations, "Family").expect("Label should resolve");
        assert_eq!(path, Path::new("/media/family"));
    }

    #[test]
    fn test_resolve_unknown_label() {
        let destinations = sample_destinations();
        let err = resolve_destination(&destinations, "Pets").expect_err("Label should not resolve");
        assert_eq!(err.label, "Pets");
        assert_eq!(err.to_string(), "Destination folder not found: Pets");
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let destinations = sample_destinations();
        assert!(resolve_destination(&destinations, "family").is_err());
    }

    #[test]
    fn test_duplicate_labels_first_match_wins() {
        let destinations = vec![
            Destination::new("Trips", "t", "/media/trips-a"),
            Destination::new("Trips", "t", "/media/trips-b"),
        ];
        let path = resolve_destination(&destinations, "Trips").expect("Label should resolve");
        assert_eq!(path, Path::new("/media/trips-a"));
    }

    #[test]
    fn test_resolve_empty_list() {
        assert!(resolve_destination(&[], "Anything").is_err());
    }
}
