// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod fingerprint;
mod id;
mod package_name;

pub use fingerprint::{Fingerprint, FingerprintError};
pub use id::{BlobId, DirectorId, Id};
pub use package_name::{PackageName, PackageNameError};
