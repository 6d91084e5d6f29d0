// ABOUTME: Gzip-compressed tarball extractor built on flate2 and tar.
// ABOUTME: Overwrites existing files so repeated installs converge.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{ExtractError, Extractor};

#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TarGzExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<(), ExtractError> {
        if !destination.is_dir() {
            return Err(ExtractError::MissingDestination(destination.to_path_buf()));
        }

        let file = File::open(archive).map_err(|source| ExtractError::Open {
            path: archive.to_path_buf(),
            source,
        })?;

        let mut tarball = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        tarball.set_preserve_permissions(true);
        tarball.set_overwrite(true);
        // tar skips entries that would land outside `destination`.
        tarball
            .unpack(destination)
            .map_err(|source| ExtractError::Unpack {
                archive: archive.to_path_buf(),
                destination: destination.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            archive = %archive.display(),
            destination = %destination.display(),
            "extracted archive"
        );
        Ok(())
    }
}
