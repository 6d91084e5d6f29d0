// ABOUTME: Release packages and the records locating their compiled artifacts.
// ABOUTME: Exports Package, CompiledPackageRecord, and the repository port.

mod record;
mod repo;

pub use record::CompiledPackageRecord;
pub use repo::{CompiledPackageRepo, JsonCompiledPackageRepo, RepoError};

use std::fmt;

use crate::types::{Fingerprint, PackageName};

/// A release package, identified for lookup by name and fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: PackageName,
    pub version: String,
    pub fingerprint: Fingerprint,
    pub dependencies: Vec<PackageName>,
}

impl Package {
    pub fn new(name: PackageName, version: impl Into<String>, fingerprint: Fingerprint) -> Self {
        Self {
            name,
            version: version.into(),
            fingerprint,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<PackageName>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Whether this package has the given lookup identity.
    pub fn same_identity(&self, name: &PackageName, fingerprint: &Fingerprint) -> bool {
        &self.name == name && &self.fingerprint == fingerprint
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.name, self.version, self.fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_name_version_and_fingerprint() {
        let pkg = Package::new(
            PackageName::new("ruby").unwrap(),
            "2.1.2",
            Fingerprint::parse("sha1:deadbeef").unwrap(),
        );
        assert_eq!(pkg.to_string(), "ruby/2.1.2 (sha1:deadbeef)");
    }
}
