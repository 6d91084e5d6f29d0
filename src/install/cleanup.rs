// ABOUTME: Guard that releases a fetched blob file when dropped.
// ABOUTME: Cleanup failures are logged and never replace the install result.

use snafu::ResultExt;
use std::path::{Path, PathBuf};

use crate::blobstore::Blobstore;

use super::error::{CleanupError, CleanupSnafu};

/// A fetched blob that is handed back to the blobstore on drop.
pub(crate) struct BlobCleanup<'a, B: Blobstore> {
    blobstore: &'a B,
    path: PathBuf,
    log_tag: &'a str,
}

impl<'a, B: Blobstore> BlobCleanup<'a, B> {
    pub(crate) fn new(blobstore: &'a B, path: PathBuf, log_tag: &'a str) -> Self {
        Self {
            blobstore,
            path,
            log_tag,
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Hand the file back to the blobstore.
    fn release(&self) -> Result<(), CleanupError> {
        self.blobstore
            .cleanup(&self.path)
            .context(CleanupSnafu { path: &self.path })
    }
}

impl<B: Blobstore> Drop for BlobCleanup<'_, B> {
    fn drop(&mut self) {
        tracing::debug!(
            tag = %self.log_tag,
            path = %self.path.display(),
            "removing compiled package tarball"
        );

        if let Err(err) = self.release() {
            tracing::error!(tag = %self.log_tag, error = %err, "cleanup failed");
        }
    }
}
