// ABOUTME: Materializes a compiled package from the blobstore into a target directory.
// ABOUTME: Resolve, fetch, prepare, extract; the fetched blob is always released.

use snafu::{OptionExt, ResultExt};
use std::path::Path;

use crate::archive::Extractor;
use crate::blobstore::Blobstore;
use crate::package::{CompiledPackageRepo, Package};
use crate::system::{DEFAULT_DIR_MODE, FileSystem};

use super::cleanup::BlobCleanup;
use super::error::{
    CreateDirSnafu, ExtractSnafu, FetchSnafu, InstallError, LookupSnafu, NotFoundSnafu,
};
use super::lock::TargetLocks;

/// Log tag used when none is supplied.
pub const DEFAULT_LOG_TAG: &str = "packageInstaller";

/// Installs already-compiled packages. It never compiles anything itself.
pub struct PackageInstaller<R, B, E, F> {
    repo: R,
    blobstore: B,
    extractor: E,
    fs: F,
    locks: Option<TargetLocks>,
    log_tag: String,
}

impl<R, B, E, F> std::fmt::Debug for PackageInstaller<R, B, E, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageInstaller")
            .field("locks", &self.locks.is_some())
            .field("log_tag", &self.log_tag)
            .finish()
    }
}

impl<R, B, E, F> PackageInstaller<R, B, E, F>
where
    R: CompiledPackageRepo,
    B: Blobstore,
    E: Extractor,
    F: FileSystem,
{
    pub fn new(repo: R, blobstore: B, extractor: E, fs: F) -> Self {
        Self {
            repo,
            blobstore,
            extractor,
            fs,
            locks: None,
            log_tag: DEFAULT_LOG_TAG.to_string(),
        }
    }

    /// Tag attached to every log event emitted by this instance.
    pub fn with_log_tag(mut self, log_tag: impl Into<String>) -> Self {
        self.log_tag = log_tag.into();
        self
    }

    /// Serialize installs that target the same directory.
    pub fn with_locks(mut self, locks: TargetLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Install `package` into `target_dir`.
    ///
    /// Once the blob has been fetched it is released through
    /// [`Blobstore::cleanup`] on every exit path. A failed cleanup is logged
    /// and does not change the returned result.
    pub fn install(&self, package: &Package, target_dir: &Path) -> Result<(), InstallError> {
        let _target = self.locks.as_ref().map(|locks| locks.lock(target_dir));

        tracing::debug!(
            tag = %self.log_tag,
            package = %package,
            target = %target_dir.display(),
            "installing compiled package"
        );

        let record = self
            .repo
            .find(package)
            .context(LookupSnafu {
                package: package.clone(),
            })?
            .context(NotFoundSnafu {
                package: package.clone(),
            })?;

        let blob_path = self
            .blobstore
            .get(&record.blob_id, &record.fingerprint)
            .context(FetchSnafu {
                record: record.clone(),
            })?;
        let blob = BlobCleanup::new(&self.blobstore, blob_path, &self.log_tag);

        self.fs
            .create_dir_all(target_dir, DEFAULT_DIR_MODE)
            .context(CreateDirSnafu { path: target_dir })?;

        self.extractor
            .extract(blob.path(), target_dir)
            .context(ExtractSnafu {
                record: record.clone(),
            })?;

        tracing::debug!(
            tag = %self.log_tag,
            package = %package,
            record = %record,
            target = %target_dir.display(),
            "installed compiled package"
        );
        Ok(())
    }
}
