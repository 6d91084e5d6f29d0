// ABOUTME: Durable deployment identity stored on local disk.
// ABOUTME: Exports the document type, its service, and the service's errors.

mod error;
mod file;
mod service;

pub use error::DeploymentConfigError;
pub use file::DeploymentFile;
pub use service::{DEFAULT_LOG_TAG, DeploymentConfigService};
