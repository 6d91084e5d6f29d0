// ABOUTME: Host capabilities consumed by the core components.
// ABOUTME: File system access and unique identifier generation.

mod fs;
mod uuid;

pub use fs::{DEFAULT_DIR_MODE, FileSystem, LocalFs};
pub use uuid::{RandomUuidGenerator, UuidError, UuidGenerator};
