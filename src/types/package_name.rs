// ABOUTME: Release package name validation.
// ABOUTME: Names double as install directory names, so path tricks are rejected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

const MAX_LEN: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackageNameError {
    #[error("package name cannot be empty")]
    Empty,

    #[error("package name exceeds maximum length of 128 characters")]
    TooLong,

    #[error("package name must start with a letter or digit")]
    InvalidStart,

    #[error("invalid character in package name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(value: &str) -> Result<Self, PackageNameError> {
        let Some(first) = value.chars().next() else {
            return Err(PackageNameError::Empty);
        };

        if value.len() > MAX_LEN {
            return Err(PackageNameError::TooLong);
        }

        if !first.is_ascii_alphanumeric() {
            return Err(PackageNameError::InvalidStart);
        }

        for c in value.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(PackageNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PackageName {
    type Err = PackageNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PackageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PackageName::new(&s).map_err(serde::de::Error::custom)
    }
}
