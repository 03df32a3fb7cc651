//! Collision-safe file naming.
//!
//! When a destination directory already holds a different file under the
//! desired name, a sibling name is generated by appending an incrementing
//! counter to the stem: `photo.jpg` becomes `photo_1.jpg`, then
//! `photo_2.jpg`, and so on until an unused name is found.

use std::path::{Path, PathBuf};

/// Finds a file name not currently present in `directory`, derived from
/// `file_name` by appending `_1`, `_2`, … to the stem.
///
/// The name is split into stem and extension at the last `.`. A name
/// without a `.` is treated as having an empty extension, so the counter
/// is appended directly: `README` becomes `README_1`.
///
/// The caller is expected to hold exclusive ownership of `directory` for
/// the duration of the batch; the existence check here is not atomic with
/// the subsequent write.
///
/// # Arguments
///
/// * `directory` - The directory in which the name must be unused
/// * `file_name` - The colliding file name to derive from
///
/// # Returns
///
/// The full path of the first unused candidate in `directory`.
pub fn find_unique_name(directory: &Path, file_name: &str) -> PathBuf {
    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, Some(ext)),
        None => (file_name, None),
    };

    let mut counter: u64 = 1;
    loop {
        let candidate_name = match extension {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = directory.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_free_name_is_counter_one() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        let unique = find_unique_name(dir, "photo.jpg");
        assert_eq!(unique, dir.join("photo_1.jpg"));
    }

    #[test]
    fn test_counter_skips_existing_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        fs::write(dir.join("photo_1.jpg"), "a").expect("Failed to write file");
        fs::write(dir.join("photo_2.jpg"), "b").expect("Failed to write file");

        let unique = find_unique_name(dir, "photo.jpg");
        assert_eq!(unique, dir.join("photo_3.jpg"));
    }

    #[test]
    fn test_name_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        let unique = find_unique_name(dir, "README");
        assert_eq!(unique, dir.join("README_1"));
    }

    #[test]
    fn test_name_with_multiple_dots_splits_at_last() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        let unique = find_unique_name(dir, "archive.tar.gz");
        assert_eq!(unique, dir.join("archive.tar_1.gz"));
    }

    #[test]
    fn test_leading_dot_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        // ".hidden" splits into an empty stem and the "hidden" extension.
        let unique = find_unique_name(dir, ".hidden");
        assert_eq!(unique, dir.join("_1.hidden"));
    }

    #[test]
    fn test_extension_is_preserved() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path();

        fs::write(dir.join("clip_1.mp4"), "x").expect("Failed to write file");

        let unique = find_unique_name(dir, "clip.mp4");
        assert_eq!(unique, dir.join("clip_2.mp4"));
    }
}
