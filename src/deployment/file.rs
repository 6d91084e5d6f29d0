// ABOUTME: The persisted deployment document.
// ABOUTME: JSON with a single DirectorID field, written with 4-space indentation.

use serde::{Deserialize, Serialize};

use crate::types::DirectorId;

/// Durable deployment metadata.
///
/// `director_id` is `None` until the config service assigns one; once set it
/// must never change for the lifetime of the deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFile {
    #[serde(rename = "DirectorID", default, with = "director_id_field")]
    pub director_id: Option<DirectorId>,
}

impl DeploymentFile {
    pub fn with_director_id(director_id: DirectorId) -> Self {
        Self {
            director_id: Some(director_id),
        }
    }

    /// Decode a document; unknown fields are ignored.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode as indented JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}

/// An empty or null `DirectorID` on disk is the same as no id.
mod director_id_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::DirectorId;

    pub fn serialize<S: Serializer>(
        value: &Option<DirectorId>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_ref().map(DirectorId::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DirectorId>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(DirectorId::new))
    }
}
