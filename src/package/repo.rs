// ABOUTME: Lookup of compiled package records by package identity.
// ABOUTME: JsonCompiledPackageRepo keeps the records in a JSON index file.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::system::FileSystem;
use crate::types::{BlobId, Fingerprint, PackageName};

use super::{CompiledPackageRecord, Package};

/// Compiled package records keyed by `(name, fingerprint)`.
pub trait CompiledPackageRepo: Send + Sync {
    /// Find the record for a package. `Ok(None)` means it was never compiled.
    fn find(&self, package: &Package) -> Result<Option<CompiledPackageRecord>, RepoError>;

    /// Store or replace the record for a package.
    fn save(&self, package: &Package, record: CompiledPackageRecord) -> Result<(), RepoError>;
}

/// Errors from compiled package lookups.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("reading package index '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("decoding package index '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("encoding package index '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("writing package index '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("package repository error: {0}")]
    Other(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PackageIndex {
    #[serde(default)]
    packages: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    name: PackageName,
    version: String,
    fingerprint: Fingerprint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<PackageName>,
    blob_id: BlobId,
    blob_fingerprint: Fingerprint,
}

impl IndexEntry {
    fn record(&self) -> CompiledPackageRecord {
        CompiledPackageRecord::new(self.blob_id.clone(), self.blob_fingerprint.clone())
    }
}

/// Repository backed by a JSON index file. A missing index is an empty repo.
pub struct JsonCompiledPackageRepo<F> {
    index_path: PathBuf,
    fs: F,
    // Serializes read-modify-write cycles of `save` within this process.
    write_lock: Mutex<()>,
}

impl<F: FileSystem> JsonCompiledPackageRepo<F> {
    pub fn new(index_path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            index_path: index_path.into(),
            fs,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.index_path
    }

    fn read_index(&self) -> Result<PackageIndex, RepoError> {
        if !self.fs.exists(&self.index_path) {
            return Ok(PackageIndex::default());
        }

        let contents = self
            .fs
            .read(&self.index_path)
            .map_err(|source| RepoError::Read {
                path: self.index_path.clone(),
                source,
            })?;

        serde_json::from_slice(&contents).map_err(|source| RepoError::Decode {
            path: self.index_path.clone(),
            source,
        })
    }

    fn write_index(&self, index: &PackageIndex) -> Result<(), RepoError> {
        let contents = serde_json::to_vec_pretty(index).map_err(|source| RepoError::Encode {
            path: self.index_path.clone(),
            source,
        })?;

        self.fs
            .write(&self.index_path, &contents)
            .map_err(|source| RepoError::Write {
                path: self.index_path.clone(),
                source,
            })
    }
}

impl<F: FileSystem> CompiledPackageRepo for JsonCompiledPackageRepo<F> {
    fn find(&self, package: &Package) -> Result<Option<CompiledPackageRecord>, RepoError> {
        let index = self.read_index()?;
        Ok(index
            .packages
            .iter()
            .find(|entry| package.same_identity(&entry.name, &entry.fingerprint))
            .map(IndexEntry::record))
    }

    fn save(&self, package: &Package, record: CompiledPackageRecord) -> Result<(), RepoError> {
        let _guard = self.write_lock.lock();
        let mut index = self.read_index()?;

        let entry = IndexEntry {
            name: package.name.clone(),
            version: package.version.clone(),
            fingerprint: package.fingerprint.clone(),
            dependencies: package.dependencies.clone(),
            blob_id: record.blob_id,
            blob_fingerprint: record.fingerprint,
        };

        match index
            .packages
            .iter_mut()
            .find(|existing| package.same_identity(&existing.name, &existing.fingerprint))
        {
            Some(existing) => *existing = entry,
            None => index.packages.push(entry),
        }

        tracing::debug!(
            index = %self.index_path.display(),
            package = %package,
            "saved compiled package record"
        );
        self.write_index(&index)
    }
}
