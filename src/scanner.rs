//! Media file enumeration.
//!
//! Lists the regular files of a single directory (no recursion), keeping
//! only those whose names end in a known image or video suffix, and yields
//! them sorted by name.

use std::fs;
use std::path::{Path, PathBuf};

/// File name suffixes recognized as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 8] = [
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".tiff", ".svg",
];

/// File name suffixes recognized as videos, matched case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 8] = [
    ".mp4", ".avi", ".mov", ".webm", ".mkv", ".flv", ".wmv", ".m4v",
];

/// A media file found in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// The file name.
    pub name: String,
    /// The absolute path to the file.
    pub path: PathBuf,
    /// File size in bytes. Zero when the size could not be read.
    pub size: u64,
}

/// Errors that can occur while scanning a directory.
#[derive(Debug)]
pub enum ScanError {
    /// The path does not exist or is not a directory.
    InvalidDirectory { path: PathBuf },
    /// The directory could not be read.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDirectory { path } => {
                write!(f, "Invalid directory path: {}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Returns true when the file name carries a recognized image suffix.
pub fn is_image_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Returns true when the file name carries a recognized video suffix.
pub fn is_video_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Returns true when the file name carries any recognized media suffix.
pub fn is_media_name(name: &str) -> bool {
    is_image_name(name) || is_video_name(name)
}

/// Enumerates the media files directly inside `dir`, sorted by name.
///
/// Only regular files whose names match the image/video allow-lists are
/// returned. Subdirectories are not descended into. A file whose size
/// cannot be read is still listed, with a size of zero.
///
/// # Errors
///
/// Returns [`ScanError::InvalidDirectory`] if `dir` does not exist or is
/// not a directory, and [`ScanError::ReadFailed`] if listing it fails.
pub fn scan_media_dir(dir: &Path) -> Result<Vec<MediaFile>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::InvalidDirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|e| ScanError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<MediaFile> = Vec::new();
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !is_media_name(&name) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(MediaFile {
            name,
            path: entry.path(),
            size,
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}
