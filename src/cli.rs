// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bosun")]
#[command(about = "Deployment identity and compiled package installation")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new bosun.yml configuration file
    Init {
        /// Overwrite an existing bosun.yml
        #[arg(long)]
        force: bool,
    },

    /// Print the deployment's director id, assigning one on first use
    DirectorId,

    /// Store a compiled package archive in the blobstore
    Publish {
        /// Package name
        name: String,

        /// Package fingerprint
        fingerprint: String,

        /// Path to the compiled package tarball (.tgz)
        archive: PathBuf,

        /// Package version
        #[arg(long, default_value = "0")]
        version: String,
    },

    /// Install a compiled package into the packages directory
    Install {
        /// Package name
        name: String,

        /// Package fingerprint
        fingerprint: String,

        /// Package version
        #[arg(long, default_value = "0")]
        version: String,
    },
}
