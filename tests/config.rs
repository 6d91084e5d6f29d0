// ABOUTME: Integration tests for configuration parsing and discovery.
// ABOUTME: Tests YAML defaults, path resolution, discovery order, and init.

use bosun::config::*;
use bosun::error::Error;
use bosun::types::PackageName;
use std::fs;
use std::path::{Path, PathBuf};

mod parsing {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.deployment_file, PathBuf::from("deployment.json"));
        assert_eq!(config.packages_dir, PathBuf::from("packages"));
    }

    #[test]
    fn partial_document_fills_defaults() {
        let yaml = r#"
deployment_file: state/deployment.json
packages_dir: /var/vcap/packages
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.deployment_file,
            PathBuf::from("state/deployment.json")
        );
        assert_eq!(config.packages_dir, PathBuf::from("/var/vcap/packages"));
        assert_eq!(config.blobstore_dir, PathBuf::from(".bosun/blobs"));
        assert_eq!(config.package_index, PathBuf::from(".bosun/packages.json"));
    }

    #[test]
    fn unknown_field_returns_error() {
        let err = Config::from_yaml("blobstore: s3\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
        assert!(err.to_string().contains("blobstore"));
    }

    #[test]
    fn package_target_joins_name() {
        let config = Config::from_yaml("packages_dir: /var/vcap/packages\n").unwrap();
        let name = PackageName::new("ruby").unwrap();
        assert_eq!(
            config.package_target(&name),
            PathBuf::from("/var/vcap/packages/ruby")
        );
    }
}

mod resolution {
    use super::*;

    #[test]
    fn relative_paths_resolve_against_base() {
        let config = Config::from_yaml("packages_dir: /opt/packages\n")
            .unwrap()
            .resolve(Path::new("/srv/project"));

        assert_eq!(
            config.deployment_file,
            PathBuf::from("/srv/project/deployment.json")
        );
        assert_eq!(
            config.blobstore_dir,
            PathBuf::from("/srv/project/.bosun/blobs")
        );
        assert_eq!(config.packages_dir, PathBuf::from("/opt/packages"));
    }

    #[test]
    fn load_anchors_paths_to_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "deployment_file: state.json\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.deployment_file, dir.path().join("state.json"));
    }

    #[test]
    fn dot_bosun_config_anchors_to_project_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".bosun")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), "").unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.packages_dir, dir.path().join("packages"));
    }
}

mod discovery {
    use super::*;

    #[test]
    fn missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = Config::discover(dir.path()).unwrap_err();

        assert!(matches!(err, Error::ConfigNotFound(path) if path == dir.path()));
    }

    #[test]
    fn primary_name_wins_over_alternates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "packages_dir: primary\n").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "packages_dir: alt\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.packages_dir, dir.path().join("primary"));
    }

    #[test]
    fn yaml_extension_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "packages_dir: alt\n").unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.packages_dir, dir.path().join("alt"));
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template_that_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();

        init_config(dir.path(), false).unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config, Config::default().resolve(dir.path()));
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "packages_dir: mine\n").unwrap();

        let err = init_config(dir.path(), false).unwrap_err();

        assert!(matches!(err, Error::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "packages_dir: mine\n");
    }

    #[test]
    fn force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "packages_dir: mine\n").unwrap();

        init_config(dir.path(), true).unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("deployment_file:"));
    }
}
