// ABOUTME: Directory-backed blobstore with fingerprint verification on fetch.
// ABOUTME: Fetched blobs are copied to temp files that callers release via cleanup.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::types::{BlobId, Fingerprint};

use super::digest::{self, DigestAlgorithm};
use super::{Blobstore, BlobstoreError};

/// Blobs live as plain files named by their id under `root`.
///
/// `get` copies the blob into `work_dir` and verifies the copy, so the file
/// handed to the caller is exactly the content that was checked.
#[derive(Debug, Clone)]
pub struct LocalBlobstore {
    root: PathBuf,
    work_dir: PathBuf,
}

impl LocalBlobstore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            work_dir: std::env::temp_dir(),
        }
    }

    /// Directory that receives fetched temp files.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, blob_id: &BlobId) -> Result<PathBuf, BlobstoreError> {
        let id = blob_id.as_str();
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
        if !valid {
            return Err(BlobstoreError::InvalidBlobId(blob_id.clone()));
        }
        Ok(self.root.join(id))
    }
}

impl Blobstore for LocalBlobstore {
    fn get(&self, blob_id: &BlobId, fingerprint: &Fingerprint) -> Result<PathBuf, BlobstoreError> {
        let source_path = self.blob_path(blob_id)?;
        let mut source = match File::open(&source_path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(BlobstoreError::NotFound(blob_id.clone()));
            }
            Err(err) => return Err(err.into()),
        };

        fs::create_dir_all(&self.work_dir)?;
        let mut temp = tempfile::Builder::new()
            .prefix("blob-")
            .tempfile_in(&self.work_dir)?;
        io::copy(&mut source, temp.as_file_mut())?;

        // The temp file is deleted on drop if verification fails.
        digest::verify(temp.path(), blob_id, fingerprint)?;

        let (_, path) = temp.keep().map_err(|e| BlobstoreError::Io(e.error))?;
        tracing::debug!(
            blob_id = %blob_id,
            path = %path.display(),
            "fetched blob"
        );
        Ok(path)
    }

    fn cleanup(&self, path: &Path) -> Result<(), BlobstoreError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn create(&self, path: &Path) -> Result<(BlobId, Fingerprint), BlobstoreError> {
        let fingerprint = DigestAlgorithm::Sha256.fingerprint(path)?;
        let blob_id = BlobId::new(uuid::Uuid::new_v4().to_string());
        let destination = self.blob_path(&blob_id)?;

        fs::create_dir_all(&self.root)?;
        let mut temp = tempfile::NamedTempFile::new_in(&self.root)?;
        io::copy(&mut File::open(path)?, temp.as_file_mut())?;
        temp.persist(&destination)
            .map_err(|e| BlobstoreError::Io(e.error))?;

        tracing::debug!(
            blob_id = %blob_id,
            fingerprint = %fingerprint,
            source = %path.display(),
            "stored blob"
        );
        Ok((blob_id, fingerprint))
    }
}
