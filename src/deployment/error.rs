// ABOUTME: Error types for loading and saving the deployment document.
// ABOUTME: Every variant carries the config path and the underlying cause.

use std::path::PathBuf;

use crate::system::UuidError;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentConfigError {
    #[error("reading deployment config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unmarshalling deployment config file '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("marshalling deployment config for '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("writing deployment config file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("generating director id for '{}': {source}", path.display())]
    UuidGeneration { path: PathBuf, source: UuidError },
}

impl DeploymentConfigError {
    /// Path of the config file the failure relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. }
            | Self::Decode { path, .. }
            | Self::Encode { path, .. }
            | Self::Write { path, .. }
            | Self::UuidGeneration { path, .. } => path,
        }
    }
}
