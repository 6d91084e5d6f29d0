// ABOUTME: Loads and saves the deployment document, allocating a DirectorID on first use.
// ABOUTME: A generated id is persisted before it is handed back to the caller.

use std::path::{Path, PathBuf};

use crate::system::{FileSystem, UuidError, UuidGenerator};
use crate::types::DirectorId;

use super::{DeploymentConfigError, DeploymentFile};

/// Log tag used when none is supplied.
pub const DEFAULT_LOG_TAG: &str = "config";

/// Owns the lifecycle of the deployment document at a fixed path.
///
/// The path is required at construction, so there is no way to load or save
/// before it is known.
pub struct DeploymentConfigService<F, G> {
    config_path: PathBuf,
    fs: F,
    uuid_generator: G,
    log_tag: String,
}

impl<F, G> std::fmt::Debug for DeploymentConfigService<F, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentConfigService")
            .field("config_path", &self.config_path)
            .field("log_tag", &self.log_tag)
            .finish()
    }
}

impl<F: FileSystem, G: UuidGenerator> DeploymentConfigService<F, G> {
    pub fn new(config_path: impl Into<PathBuf>, fs: F, uuid_generator: G) -> Self {
        Self {
            config_path: config_path.into(),
            fs,
            uuid_generator,
            log_tag: DEFAULT_LOG_TAG.to_string(),
        }
    }

    /// Tag attached to every log event emitted by this instance.
    pub fn with_log_tag(mut self, log_tag: impl Into<String>) -> Self {
        self.log_tag = log_tag.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Point the service at a different backing file.
    pub fn set_config_path(&mut self, config_path: impl Into<PathBuf>) {
        self.config_path = config_path.into();
    }

    pub fn exists(&self) -> bool {
        self.fs.exists(&self.config_path)
    }

    /// Load the document, assigning and persisting a DirectorID if it has none.
    ///
    /// A missing file is treated as an empty document. If the freshly
    /// generated id cannot be persisted, the error is returned and the id is
    /// discarded, so a returned id is always durable.
    pub fn load(&self) -> Result<DeploymentFile, DeploymentConfigError> {
        tracing::debug!(
            tag = %self.log_tag,
            path = %self.config_path.display(),
            "loading deployment config"
        );

        let deployment_file = if self.fs.exists(&self.config_path) {
            let contents =
                self.fs
                    .read(&self.config_path)
                    .map_err(|source| DeploymentConfigError::Read {
                        path: self.config_path.clone(),
                        source,
                    })?;
            tracing::debug!(
                tag = %self.log_tag,
                contents = %String::from_utf8_lossy(&contents),
                "deployment config contents"
            );

            DeploymentFile::from_json(&contents).map_err(|source| {
                DeploymentConfigError::Decode {
                    path: self.config_path.clone(),
                    source,
                }
            })?
        } else {
            DeploymentFile::default()
        };

        self.init_defaults(deployment_file)
    }

    /// Replace the backing file with `deployment_file`.
    pub fn save(&self, deployment_file: &DeploymentFile) -> Result<(), DeploymentConfigError> {
        tracing::debug!(
            tag = %self.log_tag,
            path = %self.config_path.display(),
            ?deployment_file,
            "saving deployment config"
        );

        let contents = deployment_file
            .to_json()
            .map_err(|source| DeploymentConfigError::Encode {
                path: self.config_path.clone(),
                source,
            })?;

        self.fs
            .write(&self.config_path, &contents)
            .map_err(|source| DeploymentConfigError::Write {
                path: self.config_path.clone(),
                source,
            })
    }

    fn init_defaults(
        &self,
        mut deployment_file: DeploymentFile,
    ) -> Result<DeploymentFile, DeploymentConfigError> {
        if deployment_file.director_id.is_some() {
            return Ok(deployment_file);
        }

        let generated = self
            .uuid_generator
            .generate()
            .and_then(|id| {
                if id.is_empty() {
                    return Err(UuidError("generator returned an empty id".to_string()));
                }
                Ok(id)
            })
            .map_err(|source| DeploymentConfigError::UuidGeneration {
                path: self.config_path.clone(),
                source,
            })?;
        deployment_file.director_id = Some(DirectorId::new(generated));

        if let Err(err) = self.save(&deployment_file) {
            tracing::error!(
                tag = %self.log_tag,
                error = %err,
                "discarding unpersisted director id"
            );
            return Err(err);
        }

        tracing::debug!(
            tag = %self.log_tag,
            director_id = ?deployment_file.director_id,
            "assigned new director id"
        );
        Ok(deployment_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::LocalFs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator(AtomicUsize);

    impl UuidGenerator for CountingGenerator {
        fn generate(&self) -> Result<String, UuidError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("generated-{n}"))
        }
    }

    #[test]
    fn second_load_reuses_persisted_id() {
        let dir = tempfile::tempdir().unwrap();
        let service = DeploymentConfigService::new(
            dir.path().join("deployment.json"),
            LocalFs::new(),
            CountingGenerator(AtomicUsize::new(0)),
        );

        let first = service.load().unwrap();
        let second = service.load().unwrap();

        assert_eq!(first.director_id, Some(DirectorId::from("generated-0")));
        assert_eq!(second, first);
        assert_eq!(service.uuid_generator.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn set_config_path_repoints_service() {
        let dir = tempfile::tempdir().unwrap();
        let mut service = DeploymentConfigService::new(
            dir.path().join("a.json"),
            LocalFs::new(),
            CountingGenerator(AtomicUsize::new(0)),
        );

        service.set_config_path(dir.path().join("b.json"));
        service.load().unwrap();

        assert_eq!(service.path(), dir.path().join("b.json"));
        assert!(dir.path().join("b.json").exists());
        assert!(!dir.path().join("a.json").exists());
    }
}
