//! mediasort - batch media classification and relocation
//!
//! This library relocates classified media files into named destination
//! folders: each source file is moved to its chosen destination with the
//! copy verified by SHA-256 digest, exact duplicates detected and
//! discarded, and name collisions resolved deterministically. Around that
//! engine it provides directory scanning, metadata probing, JSON
//! persistence of destinations and sessions, and desktop integration.

pub mod batch;
pub mod cli;
pub mod config;
pub mod desktop;
pub mod destination;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod relocate;
pub mod scanner;

pub use batch::{BatchResult, SortRequest, sort_media, sort_media_with};
pub use config::{ConfigError, ConfigStore, SessionState};
pub use destination::{Destination, DestinationNotFound, resolve_destination};
pub use metadata::{MediaKind, MediaMetadata};
pub use relocate::{RelocateError, RelocateOutcome, file_digest, relocate_file};
pub use scanner::{MediaFile, scan_media_dir};

pub use cli::{Cli, run};
