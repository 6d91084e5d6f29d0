// ABOUTME: Library root for bosun - deployment identity and compiled package installs.
// ABOUTME: The main binary is in main.rs.

pub mod archive;
pub mod blobstore;
pub mod config;
pub mod deployment;
pub mod error;
pub mod install;
pub mod package;
pub mod system;
pub mod types;
