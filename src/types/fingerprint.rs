// ABOUTME: Content hash identifying a compiled artifact.
// ABOUTME: Accepts "algorithm:hex" (e.g. sha256:ab12...) or a bare hex digest.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("fingerprint cannot be empty")]
    Empty,

    #[error("fingerprint has an empty algorithm: {0}")]
    EmptyAlgorithm(String),

    #[error("fingerprint has an empty digest: {0}")]
    EmptyDigest(String),

    #[error("invalid character in fingerprint: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn parse(input: &str) -> Result<Self, FingerprintError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FingerprintError::Empty);
        }

        if let Some(c) = input
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != ':' && *c != '-' && *c != '_')
        {
            return Err(FingerprintError::InvalidChar(c));
        }

        if let Some((algorithm, digest)) = input.split_once(':') {
            if algorithm.is_empty() {
                return Err(FingerprintError::EmptyAlgorithm(input.to_string()));
            }
            if digest.is_empty() {
                return Err(FingerprintError::EmptyDigest(input.to_string()));
            }
            if digest.contains(':') {
                return Err(FingerprintError::InvalidChar(':'));
            }
        }

        Ok(Self(input.to_string()))
    }

    /// Build a fingerprint from an algorithm name and hex digest.
    pub fn from_parts(algorithm: &str, digest: &str) -> Result<Self, FingerprintError> {
        Self::parse(&format!("{algorithm}:{digest}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The algorithm prefix, if the fingerprint carries one.
    pub fn algorithm(&self) -> Option<&str> {
        self.0.split_once(':').map(|(algorithm, _)| algorithm)
    }

    /// The digest without its algorithm prefix.
    pub fn digest(&self) -> &str {
        self.0
            .split_once(':')
            .map(|(_, digest)| digest)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Fingerprint::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_algorithm_and_digest() {
        let fp = Fingerprint::parse("sha1:deadbeef").unwrap();
        assert_eq!(fp.algorithm(), Some("sha1"));
        assert_eq!(fp.digest(), "deadbeef");
        assert_eq!(fp.to_string(), "sha1:deadbeef");
    }

    #[test]
    fn bare_digest_has_no_algorithm() {
        let fp = Fingerprint::parse("deadbeef").unwrap();
        assert_eq!(fp.algorithm(), None);
        assert_eq!(fp.digest(), "deadbeef");
    }

    #[test]
    fn rejects_empty_halves() {
        assert_eq!(Fingerprint::parse(""), Err(FingerprintError::Empty));
        assert!(matches!(
            Fingerprint::parse(":abc"),
            Err(FingerprintError::EmptyAlgorithm(_))
        ));
        assert!(matches!(
            Fingerprint::parse("sha1:"),
            Err(FingerprintError::EmptyDigest(_))
        ));
    }

    #[test]
    fn rejects_path_like_input() {
        assert_eq!(
            Fingerprint::parse("sha1:../etc"),
            Err(FingerprintError::InvalidChar('.'))
        );
    }
}
