//! Content-addressed file relocation.
//!
//! This module implements the copy-verify-delete-or-skip protocol for a
//! single file: the file either ends up present and byte-identical under
//! some name in the destination directory with the source removed, or the
//! source is left untouched and an error is reported. SHA-256 digests over
//! the full file content are used both to detect exact duplicates and to
//! verify transfer integrity after the copy.

use crate::naming;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// The successful outcomes of relocating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocateOutcome {
    /// The file was copied to the destination (possibly under a renamed
    /// path), verified, and removed from the source.
    Copied {
        /// The path the file ended up at.
        destination: PathBuf,
    },
    /// The destination already held a byte-identical file under the same
    /// name. The source was deleted and nothing was written.
    SkippedDuplicate,
}

/// Errors that can occur while relocating a single file.
///
/// None of these abort a batch; the orchestrator records them per entry
/// and continues.
#[derive(Debug)]
pub enum RelocateError {
    /// The source file was missing at processing time.
    SourceNotFound { path: PathBuf },
    /// Directory creation or the copy itself was denied by the filesystem.
    DestinationUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The digest of the copied file did not match the source digest.
    /// The corrupt copy has been removed and the source left untouched.
    HashVerificationFailed { path: PathBuf },
    /// Any other filesystem error (digest read, source deletion).
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for RelocateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceNotFound { path } => {
                write!(f, "Source file not found: {}", path.display())
            }
            Self::DestinationUnwritable { path, source } => {
                write!(f, "Destination not writable {}: {}", path.display(), source)
            }
            Self::HashVerificationFailed { path } => {
                write!(f, "Hash verification failed for: {}", file_name_lossy(path))
            }
            Self::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for RelocateError {}

/// Result type for relocation operations.
pub type RelocateResult<T> = Result<T, RelocateError>;

/// Computes the SHA-256 digest of a file's full content, rendered as
/// lowercase hexadecimal.
///
/// The entire file is read into memory; whole-file digest equality is the
/// authoritative duplicate test, regardless of names or timestamps.
pub fn file_digest(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn digest_source(path: &Path) -> RelocateResult<String> {
    file_digest(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RelocateError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RelocateError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Moves exactly one file from `source` into `dest_dir`.
///
/// The protocol per file:
///
/// 1. Ensure `dest_dir` exists, creating it recursively if missing.
/// 2. If `dest_dir` already holds a file under the source's name, compare
///    content digests: an exact duplicate deletes the source and reports
///    [`RelocateOutcome::SkippedDuplicate`]; a different file triggers
///    collision renaming via [`naming::find_unique_name`].
/// 3. Copy the source to the candidate path. A pre-existing file is never
///    overwritten: the candidate is either the originally absent name or a
///    freshly generated unused one.
/// 4. Re-digest the copy and compare against the source digest (reusing
///    the digest computed during duplicate detection when available). A
///    mismatch removes the copy and reports
///    [`RelocateError::HashVerificationFailed`]; a match deletes the
///    source and reports [`RelocateOutcome::Copied`].
///
/// On any error the source file is left untouched at its original path.
///
/// # Arguments
///
/// * `source` - Absolute path of the file to relocate
/// * `dest_dir` - The resolved destination directory
///
/// # Examples
///
/// ```no_run
/// use mediasort::relocate::{RelocateOutcome, relocate_file};
/// use std::path::Path;
///
/// let outcome = relocate_file(
///     Path::new("/media/incoming/photo.jpg"),
///     Path::new("/media/vacation"),
/// );
/// match outcome {
///     Ok(RelocateOutcome::Copied { destination }) => {
///         println!("Moved to {}", destination.display())
///     }
///     Ok(RelocateOutcome::SkippedDuplicate) => println!("Duplicate discarded"),
///     Err(e) => eprintln!("Relocation failed: {}", e),
/// }
/// ```
pub fn relocate_file(source: &Path, dest_dir: &Path) -> RelocateResult<RelocateOutcome> {
    if !source.is_file() {
        return Err(RelocateError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    fs::create_dir_all(dest_dir).map_err(|e| RelocateError::DestinationUnwritable {
        path: dest_dir.to_path_buf(),
        source: e,
    })?;

    let file_name = source
        .file_name()
        .ok_or_else(|| RelocateError::SourceNotFound {
            path: source.to_path_buf(),
        })?;

    let mut candidate = dest_dir.join(file_name);
    let mut source_digest: Option<String> = None;

    if candidate.exists() {
        let src_hash = digest_source(source)?;
        let dest_hash = file_digest(&candidate).map_err(|e| RelocateError::Io {
            path: candidate.clone(),
            source: e,
        })?;

        if src_hash == dest_hash {
            // Exact duplicate already in place. Discard the source.
            fs::remove_file(source).map_err(|e| RelocateError::Io {
                path: source.to_path_buf(),
                source: e,
            })?;
            return Ok(RelocateOutcome::SkippedDuplicate);
        }

        // Same name, different content. Pick an unused sibling name.
        candidate = naming::find_unique_name(dest_dir, &file_name.to_string_lossy());
        source_digest = Some(src_hash);
    }

    fs::copy(source, &candidate).map_err(|e| RelocateError::DestinationUnwritable {
        path: candidate.clone(),
        source: e,
    })?;

    let src_hash = match source_digest {
        Some(hash) => hash,
        None => digest_source(source)?,
    };
    let copy_hash = file_digest(&candidate).map_err(|e| RelocateError::Io {
        path: candidate.clone(),
        source: e,
    })?;

    if src_hash != copy_hash {
        if let Err(e) = fs::remove_file(&candidate) {
            eprintln!(
                "Warning: could not remove corrupt copy {}: {}",
                candidate.display(),
                e
            );
        }
        return Err(RelocateError::HashVerificationFailed {
            path: source.to_path_buf(),
        });
    }

    // The copy is verified; only now is the source removed. If the removal
    // fails, take the copy back out so the file never exists in both
    // places at once.
    if let Err(e) = fs::remove_file(source) {
        if let Err(cleanup) = fs::remove_file(&candidate) {
            eprintln!(
                "Warning: could not remove copy {} after failed source deletion: {}",
                candidate.display(),
                cleanup
            );
        }
        return Err(RelocateError::Io {
            path: source.to_path_buf(),
            source: e,
        });
    }

    Ok(RelocateOutcome::Copied {
        destination: candidate,
    })
}
