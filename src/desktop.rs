//! Desktop integration: open a file with the default handler or reveal it
//! in the platform file manager. Best effort and platform specific; not
//! part of the relocation engine's correctness.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Errors from desktop actions.
#[derive(Debug)]
pub enum DesktopError {
    /// The file does not exist.
    FileNotFound { path: PathBuf },
    /// The platform handler could not be launched.
    LaunchFailed { reason: String },
}

impl std::fmt::Display for DesktopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound { path } => write!(f, "File not found: {}", path.display()),
            Self::LaunchFailed { reason } => write!(f, "Could not open: {}", reason),
        }
    }
}

impl std::error::Error for DesktopError {}

/// Opens a file with the OS default application.
pub fn open_file(path: &Path) -> Result<(), DesktopError> {
    if !path.exists() {
        return Err(DesktopError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    #[cfg(target_os = "windows")]
    let result = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg(path).spawn();

    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    let result = Command::new("xdg-open").arg(path).spawn();

    result
        .map(|_| ())
        .map_err(|e| DesktopError::LaunchFailed {
            reason: e.to_string(),
        })
}

/// Reveals a file in the platform file manager.
///
/// Windows and macOS highlight the file itself; elsewhere the parent
/// directory is opened, since most Linux file managers cannot highlight a
/// single entry.
pub fn reveal_in_file_manager(path: &Path) -> Result<(), DesktopError> {
    if !path.exists() {
        return Err(DesktopError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    #[cfg(target_os = "windows")]
    let result = Command::new("explorer")
        .arg("/select,")
        .arg(path)
        .spawn();

    #[cfg(target_os = "macos")]
    let result = Command::new("open").arg("-R").arg(path).spawn();

    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    let result = {
        let parent = path.parent().ok_or_else(|| DesktopError::LaunchFailed {
            reason: "file has no parent directory".to_string(),
        })?;
        Command::new("xdg-open").arg(parent).spawn()
    };

    result
        .map(|_| ())
        .map_err(|e| DesktopError::LaunchFailed {
            reason: e.to_string(),
        })
}
