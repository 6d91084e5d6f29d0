// ABOUTME: Compiled package installation onto local disk.
// ABOUTME: Exports the installer, its errors, and per-target install locks.

mod cleanup;
mod error;
mod installer;
mod lock;

pub use error::{CleanupError, InstallError, InstallErrorKind};
pub use installer::{DEFAULT_LOG_TAG, PackageInstaller};
pub use lock::{TargetGuard, TargetLocks};
