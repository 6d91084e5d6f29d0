// ABOUTME: Archive extraction used to materialize compiled packages on disk.
// ABOUTME: Defines the Extractor port and a gzip tarball implementation.

mod tar_gz;

pub use tar_gz::TarGzExtractor;

use std::path::{Path, PathBuf};

/// Unpacks an archive into an existing directory.
pub trait Extractor: Send + Sync {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError>;
}

/// Errors from archive extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("opening archive '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("extraction destination is not a directory: {}", .0.display())]
    MissingDestination(PathBuf),

    #[error("unpacking '{}' into '{}': {source}", archive.display(), destination.display())]
    Unpack {
        archive: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },

    #[error("extraction failed: {0}")]
    Other(String),
}
