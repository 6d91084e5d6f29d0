// ABOUTME: Application-wide error types for bosun.
// ABOUTME: Wraps component errors for the command-line entry point.

use std::path::PathBuf;
use thiserror::Error;

use crate::blobstore::BlobstoreError;
use crate::deployment::DeploymentConfigError;
use crate::install::InstallError;
use crate::package::RepoError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    DeploymentConfig(#[from] DeploymentConfigError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Blobstore(#[from] BlobstoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
