// ABOUTME: Content-addressed blob retrieval and cleanup.
// ABOUTME: Defines the Blobstore port and a directory-backed LocalBlobstore.

mod digest;
mod local;

pub use digest::DigestAlgorithm;
pub use local::LocalBlobstore;

use std::path::{Path, PathBuf};

use crate::types::{BlobId, Fingerprint};

/// Blob operations: fetch to a local temp file, release it, store new blobs.
pub trait Blobstore: Send + Sync {
    /// Retrieve a blob into a local temporary file and return its path.
    ///
    /// Implementations verify the content against `fingerprint` and never
    /// return a path to content that failed verification.
    fn get(&self, blob_id: &BlobId, fingerprint: &Fingerprint) -> Result<PathBuf, BlobstoreError>;

    /// Release a file previously returned by [`get`](Blobstore::get).
    fn cleanup(&self, path: &Path) -> Result<(), BlobstoreError>;

    /// Store the file at `path` as a new blob.
    fn create(&self, path: &Path) -> Result<(BlobId, Fingerprint), BlobstoreError>;
}

/// Errors from blob operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobstoreError {
    #[error("blob not found: {0}")]
    NotFound(BlobId),

    #[error("invalid blob id: {0}")]
    InvalidBlobId(BlobId),

    #[error("fingerprint mismatch for blob {blob_id}: expected {expected}, got {actual}")]
    DigestMismatch {
        blob_id: BlobId,
        expected: Fingerprint,
        actual: String,
    },

    #[error("unsupported fingerprint algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("blobstore I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blobstore error: {0}")]
    Other(String),
}
