//! Opaque record identifiers.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::constants::MAX_ID_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Server-minted identifier shared by users, tasks and projects.
///
/// New identifiers are UUID v4 text, but any string of 1 to 64 ASCII letters,
/// digits, `-` or `_` is accepted when parsing, so records created elsewhere
/// remain addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Mint a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an identifier received from outside
    pub fn parse(value: &str) -> DomainResult<Self> {
        if is_valid_id(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidId(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Check identifier syntax without allocating.
pub fn is_valid_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_ID_LENGTH
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Id {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::parse(s)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        id.0
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Id::parse(&raw).map_err(serde::de::Error::custom)
    }
}
