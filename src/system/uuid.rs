// ABOUTME: Unique identifier generation capability.
// ABOUTME: RandomUuidGenerator produces hyphenated v4 UUIDs.

use thiserror::Error;

/// Errors from identifier generation.
#[derive(Debug, Error)]
#[error("failed to generate uuid: {0}")]
pub struct UuidError(pub String);

/// Produces fresh unique identifier strings.
pub trait UuidGenerator: Send + Sync {
    fn generate(&self) -> Result<String, UuidError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuidGenerator;

impl RandomUuidGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl UuidGenerator for RandomUuidGenerator {
    fn generate(&self) -> Result<String, UuidError> {
        Ok(::uuid::Uuid::new_v4().hyphenated().to_string())
    }
}
