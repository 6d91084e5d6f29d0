// ABOUTME: Install and cleanup error types with SNAFU context selectors.
// ABOUTME: Each variant names the failing stage and carries the package, record, or path.

use snafu::Snafu;
use std::path::PathBuf;

use crate::archive::ExtractError;
use crate::blobstore::BlobstoreError;
use crate::package::{CompiledPackageRecord, Package, RepoError};

/// Failure of one stage of [`PackageInstaller::install`](super::PackageInstaller::install).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InstallError {
    #[snafu(display("finding compiled package record for {package}: {source}"))]
    Lookup { package: Package, source: RepoError },

    #[snafu(display("compiled package record not found: {package}"))]
    NotFound { package: Package },

    #[snafu(display("getting compiled package {record} from blobstore: {source}"))]
    Fetch {
        record: CompiledPackageRecord,
        source: BlobstoreError,
    },

    #[snafu(display("creating target dir '{}': {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("extracting compiled package {record}: {source}"))]
    Extract {
        record: CompiledPackageRecord,
        source: ExtractError,
    },
}

/// Failure to release a fetched blob. Logged only, never returned by `install`.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(display("removing compiled package tarball '{}': {source}", path.display()))]
pub struct CleanupError {
    path: PathBuf,
    source: BlobstoreError,
}

impl CleanupError {
    /// The fetched file that could not be removed.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallErrorKind {
    /// The package repository could not be queried.
    Lookup,
    /// The package has never been compiled.
    NotFound,
    /// The blob could not be retrieved or failed verification.
    Fetch,
    /// The target directory could not be created.
    CreateDir,
    /// The archive could not be unpacked.
    Extract,
}

impl InstallError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> InstallErrorKind {
        match self {
            InstallError::Lookup { .. } => InstallErrorKind::Lookup,
            InstallError::NotFound { .. } => InstallErrorKind::NotFound,
            InstallError::Fetch { .. } => InstallErrorKind::Fetch,
            InstallError::CreateDir { .. } => InstallErrorKind::CreateDir,
            InstallError::Extract { .. } => InstallErrorKind::Extract,
        }
    }

    /// The compiled package record involved, once lookup has succeeded.
    pub fn record(&self) -> Option<&CompiledPackageRecord> {
        match self {
            InstallError::Fetch { record, .. } | InstallError::Extract { record, .. } => {
                Some(record)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BlobId, Fingerprint, PackageName};

    fn record() -> CompiledPackageRecord {
        CompiledPackageRecord::new(
            BlobId::from("blob-42"),
            Fingerprint::parse("sha1:deadbeef").unwrap(),
        )
    }

    #[test]
    fn not_found_names_the_package() {
        let package = Package::new(
            PackageName::new("ruby").unwrap(),
            "2.1",
            Fingerprint::parse("sha1:deadbeef").unwrap(),
        );
        let err = InstallError::NotFound { package };

        assert_eq!(err.kind(), InstallErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "compiled package record not found: ruby/2.1 (sha1:deadbeef)"
        );
        assert!(err.record().is_none());
    }

    #[test]
    fn cleanup_error_names_the_tarball() {
        let err = CleanupError {
            path: PathBuf::from("/tmp/blob-42.tgz"),
            source: BlobstoreError::Other("busy".to_string()),
        };

        assert_eq!(err.path(), std::path::Path::new("/tmp/blob-42.tgz"));
        assert_eq!(
            err.to_string(),
            "removing compiled package tarball '/tmp/blob-42.tgz': blobstore error: busy"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn extract_error_keeps_record_and_cause() {
        let err = InstallError::Extract {
            record: record(),
            source: ExtractError::Other("bad header".to_string()),
        };

        assert_eq!(err.kind(), InstallErrorKind::Extract);
        assert_eq!(err.record(), Some(&record()));
        assert!(err.to_string().contains("blob blob-42 (sha1:deadbeef)"));
        assert!(err.to_string().contains("bad header"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
