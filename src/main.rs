// ABOUTME: Entry point for the bosun CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use bosun::archive::TarGzExtractor;
use bosun::blobstore::{Blobstore, LocalBlobstore};
use bosun::config::{self, Config};
use bosun::deployment::DeploymentConfigService;
use bosun::error::{Error, Result};
use bosun::install::PackageInstaller;
use bosun::package::{CompiledPackageRecord, CompiledPackageRepo, JsonCompiledPackageRepo, Package};
use bosun::system::{LocalFs, RandomUuidGenerator};
use bosun::types::{Fingerprint, PackageName};
use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Init { force } => {
            config::init_config(&cwd, force)?;
            println!("Created {}", config::CONFIG_FILENAME);
            Ok(())
        }
        Commands::DirectorId => {
            let config = Config::discover(&cwd)?;
            let service = DeploymentConfigService::new(
                &config.deployment_file,
                LocalFs::new(),
                RandomUuidGenerator::new(),
            );
            let deployment = service.load()?;
            if let Some(director_id) = deployment.director_id {
                println!("{director_id}");
            }
            Ok(())
        }
        Commands::Publish {
            name,
            fingerprint,
            archive,
            version,
        } => {
            let config = Config::discover(&cwd)?;
            let package = parse_package(&name, &fingerprint, version)?;

            let blobstore = LocalBlobstore::new(&config.blobstore_dir);
            let (blob_id, blob_fingerprint) = blobstore.create(&archive)?;

            let repo = JsonCompiledPackageRepo::new(&config.package_index, LocalFs::new());
            repo.save(
                &package,
                CompiledPackageRecord::new(blob_id.clone(), blob_fingerprint),
            )?;

            println!("Published {package} as blob {blob_id}");
            Ok(())
        }
        Commands::Install {
            name,
            fingerprint,
            version,
        } => {
            let config = Config::discover(&cwd)?;
            let package = parse_package(&name, &fingerprint, version)?;
            let target = config.package_target(&package.name);

            let installer = PackageInstaller::new(
                JsonCompiledPackageRepo::new(&config.package_index, LocalFs::new()),
                LocalBlobstore::new(&config.blobstore_dir),
                TarGzExtractor::new(),
                LocalFs::new(),
            );
            installer.install(&package, &target)?;

            println!("Installed {package} into {}", target.display());
            Ok(())
        }
    }
}

fn parse_package(name: &str, fingerprint: &str, version: String) -> Result<Package> {
    let name = PackageName::new(name).map_err(|e| Error::InvalidArgument(e.to_string()))?;
    let fingerprint =
        Fingerprint::parse(fingerprint).map_err(|e| Error::InvalidArgument(e.to_string()))?;
    Ok(Package::new(name, version, fingerprint))
}
