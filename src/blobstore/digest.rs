// ABOUTME: Fingerprint verification for retrieved blobs.
// ABOUTME: Streams file content through SHA-1 and SHA-2 digests.

use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::types::{BlobId, Fingerprint};

use super::BlobstoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Algorithm named by a fingerprint; a bare digest means sha256.
    pub fn for_fingerprint(fingerprint: &Fingerprint) -> Result<Self, BlobstoreError> {
        match fingerprint.algorithm() {
            None => Ok(Self::Sha256),
            Some(name) => match name.to_ascii_lowercase().as_str() {
                "sha1" => Ok(Self::Sha1),
                "sha256" => Ok(Self::Sha256),
                "sha512" => Ok(Self::Sha512),
                other => Err(BlobstoreError::UnsupportedAlgorithm(other.to_string())),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Hex digest of the file at `path`.
    pub fn hex_digest(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        match self {
            Self::Sha1 => {
                let mut hasher = Sha1::new();
                io::copy(&mut file, &mut hasher)?;
                Ok(format!("{:x}", hasher.finalize()))
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(&mut file, &mut hasher)?;
                Ok(format!("{:x}", hasher.finalize()))
            }
            Self::Sha512 => {
                let mut hasher = Sha512::new();
                io::copy(&mut file, &mut hasher)?;
                Ok(format!("{:x}", hasher.finalize()))
            }
        }
    }

    /// Fingerprint of the file at `path` in `algorithm:hex` form.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, BlobstoreError> {
        let digest = self.hex_digest(path)?;
        Fingerprint::from_parts(self.name(), &digest)
            .map_err(|e| BlobstoreError::Other(e.to_string()))
    }
}

/// Check the file at `path` against the fingerprint recorded for `blob_id`.
pub(super) fn verify(
    path: &Path,
    blob_id: &BlobId,
    fingerprint: &Fingerprint,
) -> Result<(), BlobstoreError> {
    let algorithm = DigestAlgorithm::for_fingerprint(fingerprint)?;
    let actual = algorithm.hex_digest(path)?;
    if actual.eq_ignore_ascii_case(fingerprint.digest()) {
        return Ok(());
    }

    Err(BlobstoreError::DigestMismatch {
        blob_id: blob_id.clone(),
        expected: fingerprint.clone(),
        actual: format!("{}:{}", algorithm.name(), actual),
    })
}
