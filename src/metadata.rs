//! Media metadata probing.
//!
//! Reads per-file metadata for display purposes: size, pixel dimensions
//! and, for videos, duration. Image dimensions are read directly from the
//! file header; video streams are probed by invoking `ffprobe` and parsing
//! its JSON output. Probe failures degrade to partial metadata (`None`
//! fields) rather than erroring, so a file with an unreadable header still
//! reports its size and kind.

use crate::scanner::is_video_name;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Broad media kind, decided by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Metadata for one media file. Attributes that could not be determined
/// are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// File size in bytes.
    pub size: u64,
    /// Pixel width, when readable.
    pub width: Option<u32>,
    /// Pixel height, when readable.
    pub height: Option<u32>,
    /// Duration in seconds; always `None` for images.
    pub duration_seconds: Option<f32>,
    /// Whether the file was treated as an image or a video.
    pub kind: MediaKind,
}

/// Errors that can occur while probing a file.
#[derive(Debug)]
pub enum MetadataError {
    /// The file does not exist.
    FileNotFound { path: PathBuf },
    /// The file's size could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "Error reading {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for MetadataError {}

/// Probes a single media file.
///
/// The file's suffix decides the probe strategy: video suffixes go through
/// `ffprobe`, everything else is treated as an image. Dimension and
/// duration failures are absorbed into `None` fields.
///
/// # Errors
///
/// Returns an error only when the file is missing or its size cannot be
/// read; probe failures are not errors.
pub fn probe(path: &Path) -> Result<MediaMetadata, MetadataError> {
    if !path.exists() {
        return Err(MetadataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let size = fs::metadata(path)
        .map_err(|e| MetadataError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if is_video_name(&name) {
        let (width, height, duration_seconds) = probe_video(path);
        Ok(MediaMetadata {
            size,
            width,
            height,
            duration_seconds,
            kind: MediaKind::Video,
        })
    } else {
        let (width, height) = probe_image(path);
        Ok(MediaMetadata {
            size,
            width,
            height,
            duration_seconds: None,
            kind: MediaKind::Image,
        })
    }
}

/// Reads image dimensions from the file header without decoding pixels.
fn probe_image(path: &Path) -> (Option<u32>, Option<u32>) {
    match image::image_dimensions(path) {
        Ok((width, height)) => (Some(width), Some(height)),
        Err(_) => (None, None),
    }
}

/// Probes a video file with `ffprobe`, returning width, height and
/// duration where available. Any failure, including `ffprobe` being
/// absent, yields all-`None`.
fn probe_video(path: &Path) -> (Option<u32>, Option<u32>, Option<f32>) {
    let output = match Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams", "-show_format"])
        .arg(path)
        .output()
    {
        Ok(output) if output.status.success() => output,
        _ => return (None, None, None),
    };

    let json: Value = match serde_json::from_slice(&output.stdout) {
        Ok(json) => json,
        Err(_) => return (None, None, None),
    };

    let mut width = None;
    let mut height = None;
    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            if stream.get("codec_type").and_then(|t| t.as_str()) == Some("video") {
                width = stream.get("width").and_then(|w| w.as_u64()).map(|w| w as u32);
                height = stream
                    .get("height")
                    .and_then(|h| h.as_u64())
                    .map(|h| h as u32);
                break;
            }
        }
    }

    let duration = json
        .get("format")
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(|d| d.parse::<f32>().ok());

    (width, height, duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A valid 1x1 PNG.
    const TINY_PNG: [u8; 67] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_probe_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing.jpg");
        assert!(matches!(
            probe(&missing),
            Err(MetadataError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_probe_png_dimensions() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("tiny.png");
        fs::write(&file, TINY_PNG).expect("Failed to write file");

        let meta = probe(&file).expect("Probe failed");
        assert_eq!(meta.kind, MediaKind::Image);
        assert_eq!(meta.size, TINY_PNG.len() as u64);
        assert_eq!(meta.width, Some(1));
        assert_eq!(meta.height, Some(1));
        assert_eq!(meta.duration_seconds, None);
    }

    #[test]
    fn test_probe_unreadable_image_degrades_to_partial() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("broken.jpg");
        fs::write(&file, b"not an image at all").expect("Failed to write file");

        let meta = probe(&file).expect("Probe failed");
        assert_eq!(meta.kind, MediaKind::Image);
        assert_eq!(meta.size, 19);
        assert_eq!(meta.width, None);
        assert_eq!(meta.height, None);
    }

    #[test]
    fn test_probe_video_kind_by_suffix() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("clip.mp4");
        fs::write(&file, b"not a real video").expect("Failed to write file");

        // ffprobe will fail on this content (or be absent); the probe must
        // still report size and kind.
        let meta = probe(&file).expect("Probe failed");
        assert_eq!(meta.kind, MediaKind::Video);
        assert_eq!(meta.size, 16);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Image).expect("Failed to serialize"),
            "\"image\""
        );
        assert_eq!(
            serde_json::to_string(&MediaKind::Video).expect("Failed to serialize"),
            "\"video\""
        );
    }
}
