// ABOUTME: Project configuration parsing for bosun.yml.
// ABOUTME: Locates the deployment file, blobstore, package index, and install root.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "bosun.yml";
pub const CONFIG_FILENAME_ALT: &str = "bosun.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".bosun/config.yml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_deployment_file")]
    pub deployment_file: PathBuf,

    #[serde(default = "default_blobstore_dir")]
    pub blobstore_dir: PathBuf,

    #[serde(default = "default_package_index")]
    pub package_index: PathBuf,

    #[serde(default = "default_packages_dir")]
    pub packages_dir: PathBuf,
}

fn default_deployment_file() -> PathBuf {
    PathBuf::from("deployment.json")
}

fn default_blobstore_dir() -> PathBuf {
    PathBuf::from(".bosun/blobs")
}

fn default_package_index() -> PathBuf {
    PathBuf::from(".bosun/packages.json")
}

fn default_packages_dir() -> PathBuf {
    PathBuf::from("packages")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deployment_file: default_deployment_file(),
            blobstore_dir: default_blobstore_dir(),
            package_index: default_package_index(),
            packages_dir: default_packages_dir(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Load a config file; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        let base = project_root(path);
        Ok(config.resolve(&base))
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "using config file");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Make every relative path absolute against `base`.
    pub fn resolve(self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        Self {
            deployment_file: join(self.deployment_file),
            blobstore_dir: join(self.blobstore_dir),
            package_index: join(self.package_index),
            packages_dir: join(self.packages_dir),
        }
    }

    /// Where a package with the given name is installed.
    pub fn package_target(&self, name: &crate::types::PackageName) -> PathBuf {
        self.packages_dir.join(name.as_str())
    }
}

/// The directory a config file's relative paths are anchored to.
///
/// For `.bosun/config.yml` that is the project directory, not `.bosun/`.
fn project_root(config_path: &Path) -> PathBuf {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    let root = if parent.file_name().is_some_and(|name| name == ".bosun") {
        parent.parent().unwrap_or(Path::new("."))
    } else {
        parent
    };
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root.to_path_buf()
    }
}

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    std::fs::write(&config_path, generate_template_yaml(&Config::default()))?;
    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# Deployment identity document (created on first use)
deployment_file: {}
# Compiled package blobs
blobstore_dir: {}
# Index mapping packages to compiled blobs
package_index: {}
# Packages are installed into <packages_dir>/<name>
packages_dir: {}
"#,
        config.deployment_file.display(),
        config.blobstore_dir.display(),
        config.package_index.display(),
        config.packages_dir.display(),
    )
}
