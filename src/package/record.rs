// ABOUTME: Location of a compiled package inside the blob store.
// ABOUTME: Pairs an opaque blob handle with the fingerprint used to verify it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{BlobId, Fingerprint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPackageRecord {
    pub blob_id: BlobId,
    pub fingerprint: Fingerprint,
}

impl CompiledPackageRecord {
    pub fn new(blob_id: BlobId, fingerprint: Fingerprint) -> Self {
        Self {
            blob_id,
            fingerprint,
        }
    }
}

impl fmt::Display for CompiledPackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob {} ({})", self.blob_id, self.fingerprint)
    }
}
