//! Directory classification for project directories.
//!
//! Projects are flat: the manifest and every image live directly inside the
//! project directory. Nothing here recurses.
//!
//! - [`DirectoryListing`] - one snapshot of the files directly inside a directory
//! - [`is_image_name`] - case-insensitive match against [`crate::IMAGE_EXTENSIONS`]
//! - [`is_directory_empty`] - emptiness check that ignores OS noise files

/// Emptiness check for new project locations.
pub mod empty;

/// Single-level directory snapshot.
pub mod listing;

pub use empty::{IGNORED_NAMES, is_directory_empty, is_ignored_name};
pub use listing::{DirectoryListing, is_image_name};
